//! Unit tests for tl-signal.

use tl_core::{Action, AgentId, JunctionId, Layout, LayoutKind};

use crate::{ActionSpace, Phase, PhaseCommand, PhaseController, SignalError};

// ── Helpers ───────────────────────────────────────────────────────────────────

const GREEN: u32 = 10;
const YELLOW: u32 = 4;
const STEP: u32 = 2;

const TL: JunctionId = JunctionId(0);
const DE: JunctionId = JunctionId(1);

fn controller(junctions: Vec<JunctionId>) -> PhaseController {
    PhaseController::new(AgentId::FIRST, ActionSpace::new(junctions), GREEN, YELLOW).unwrap()
}

/// Advance one control tick and poll the yellow timer, like the loop does.
fn tick(c: &mut PhaseController) -> Option<PhaseCommand> {
    c.advance(STEP);
    c.poll_yellow().unwrap()
}

/// Run ticks until a green is committed; returns the ticks taken.
fn ticks_to_green(c: &mut PhaseController) -> u32 {
    let mut n = 0;
    loop {
        n += 1;
        if let Some(cmd) = tick(c) {
            assert!(!cmd.phase.is_yellow());
            return n;
        }
        assert!(n < 100, "yellow never ended");
    }
}

// ── Phase ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod phase {
    use super::*;

    #[test]
    fn green_even_yellow_odd() {
        for a in 0..4u8 {
            assert_eq!(Phase::Green(a).code(), u32::from(a) * 2);
            assert_eq!(Phase::Yellow(a).code(), u32::from(a) * 2 + 1);
        }
        assert!(Phase::Yellow(2).is_yellow());
        assert_eq!(Phase::Yellow(2).local_action(), 2);
    }
}

// ── ActionSpace ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod space {
    use super::*;

    #[test]
    fn single_junction_is_identity() {
        let s = ActionSpace::new(vec![TL]);
        assert_eq!(s.size(), 4);
        assert_eq!(s.resolve(Action(3)).unwrap(), (TL, 3));
        assert!(matches!(s.resolve(Action(4)), Err(SignalError::UnknownAction { size: 4, .. })));
    }

    #[test]
    fn shared_space_offsets_second_junction() {
        let layout = Layout::new(LayoutKind::DualShared);
        let s = ActionSpace::for_agent(layout.agent(AgentId::FIRST));
        assert_eq!(s.size(), 8);
        assert_eq!(s.resolve(Action(2)).unwrap(), (TL, 2));
        assert_eq!(s.resolve(Action(4)).unwrap(), (DE, 0));
        assert_eq!(s.resolve(Action(7)).unwrap(), (DE, 3));
        assert!(s.resolve(Action(8)).is_err());
    }

    #[test]
    fn second_agent_addresses_second_junction() {
        let layout = Layout::new(LayoutKind::DualIndependent);
        let s = ActionSpace::for_agent(layout.agent(AgentId::SECOND));
        assert_eq!(s.resolve(Action(1)).unwrap(), (DE, 1));
    }
}

// ── PhaseController ───────────────────────────────────────────────────────────

#[cfg(test)]
mod controller {
    use super::*;

    #[test]
    fn empty_space_rejected() {
        let result = PhaseController::new(AgentId::FIRST, ActionSpace::new(vec![]), GREEN, YELLOW);
        assert!(matches!(result, Err(SignalError::NoJunctions(_))));
    }

    #[test]
    fn first_check_decides_immediately() {
        let c = controller(vec![TL]);
        assert!(c.decision_due());
        assert_eq!(c.last_action(), None);
        assert_eq!(c.timer().elapsed, GREEN);
    }

    #[test]
    fn first_decision_emits_no_yellow() {
        let mut c = controller(vec![TL]);
        assert_eq!(c.commit_decision(Action(1)).unwrap(), None);
        assert!(c.timer().is_yellow);
        assert!(!c.decision_due());
        assert_eq!(c.displayed(TL), None);
    }

    #[test]
    fn yellow_lasts_exactly_yellow_duration() {
        let mut c = controller(vec![TL]);
        c.commit_decision(Action(0)).unwrap();
        assert_eq!(ticks_to_green(&mut c) * STEP, YELLOW);
        assert_eq!(c.displayed(TL), Some(Phase::Green(0)));

        for _ in 0..GREEN / STEP {
            assert!(!c.decision_due());
            tick(&mut c);
        }
        assert!(c.decision_due());

        let yellow = c.commit_decision(Action(2)).unwrap();
        assert_eq!(yellow, Some(PhaseCommand { junction: TL, phase: Phase::Yellow(0) }));
        assert_eq!(c.displayed(TL), Some(Phase::Yellow(0)));
        assert_eq!(ticks_to_green(&mut c) * STEP, YELLOW);
        assert_eq!(c.displayed(TL), Some(Phase::Green(2)));
    }

    #[test]
    fn green_commit_carries_pending_action_code() {
        let mut c = controller(vec![TL]);
        c.commit_decision(Action(3)).unwrap();
        tick(&mut c);
        let green = tick(&mut c).unwrap();
        assert_eq!(green.phase.code(), 6);
        assert_eq!(c.timer().pending_action, None);
        assert_eq!(c.timer().elapsed, 0);
    }

    #[test]
    fn same_action_stays_green_and_resets_window() {
        let mut c = controller(vec![TL]);
        c.commit_decision(Action(1)).unwrap();
        ticks_to_green(&mut c);
        for _ in 0..5 {
            tick(&mut c);
        }
        assert!(c.decision_due());
        assert_eq!(c.commit_decision(Action(1)).unwrap(), None);
        assert!(!c.timer().is_yellow);
        assert_eq!(c.timer().elapsed, 0);
        assert!(!c.decision_due());
        assert_eq!(c.displayed(TL), Some(Phase::Green(1)));
    }

    #[test]
    fn never_decides_during_yellow() {
        let mut c = controller(vec![TL]);
        c.commit_decision(Action(1)).unwrap();
        c.advance(GREEN * 3);
        assert!(!c.decision_due());
        assert!(c.poll_yellow().unwrap().is_some());
    }

    #[test]
    fn zero_yellow_commits_on_first_poll() {
        let mut c = PhaseController::new(AgentId::FIRST, ActionSpace::new(vec![TL]), GREEN, 0).unwrap();
        c.commit_decision(Action(2)).unwrap();
        assert_eq!(
            c.poll_yellow().unwrap(),
            Some(PhaseCommand { junction: TL, phase: Phase::Green(2) })
        );
    }

    #[test]
    fn out_of_space_action_rejected_without_state_change() {
        let mut c = controller(vec![TL]);
        assert!(c.commit_decision(Action(4)).is_err());
        assert!(c.decision_due());
        assert_eq!(c.last_action(), None);
    }

    #[test]
    fn second_junction_yellow_uses_its_own_previous_action() {
        let mut c = PhaseController::new(AgentId::SECOND, ActionSpace::new(vec![DE]), GREEN, YELLOW).unwrap();
        c.commit_decision(Action(3)).unwrap();
        ticks_to_green(&mut c);
        c.advance(GREEN);
        let yellow = c.commit_decision(Action(0)).unwrap().unwrap();
        assert_eq!(yellow, PhaseCommand { junction: DE, phase: Phase::Yellow(3) });
        assert_eq!(yellow.phase.code(), 7);
    }

    #[test]
    fn shared_controller_addresses_both_junctions() {
        let mut c = controller(vec![TL, DE]);
        c.commit_decision(Action(5)).unwrap();
        ticks_to_green(&mut c);
        assert_eq!(c.displayed(DE), Some(Phase::Green(1)));
        assert_eq!(c.displayed(TL), None);

        c.advance(GREEN);
        let yellow = c.commit_decision(Action(2)).unwrap().unwrap();
        assert_eq!(yellow, PhaseCommand { junction: DE, phase: Phase::Yellow(1) });

        tick(&mut c);
        let green = tick(&mut c).unwrap();
        assert_eq!(green, PhaseCommand { junction: TL, phase: Phase::Green(2) });
        assert_eq!(green.phase.code(), 4);
    }

    #[test]
    fn one_phase_per_junction_at_any_time() {
        let mut c = controller(vec![TL]);
        let mut decisions = [0u16, 2, 2, 1, 3, 0].into_iter();
        for _ in 0..200 {
            if c.decision_due() {
                match decisions.next() {
                    Some(a) => {
                        c.commit_decision(Action(a)).unwrap();
                    }
                    None => break,
                }
            }
            tick(&mut c);
            if let Some(phase) = c.displayed(TL) {
                assert_eq!(phase.is_yellow(), c.timer().is_yellow);
            }
        }
    }
}
