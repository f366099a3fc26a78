//! `PhaseController` — green/yellow timing for one agent's junctions.

use tracing::debug;

use tl_core::{Action, AgentId, JunctionId};

use crate::{ActionSpace, Phase, PhaseCommand, SignalError, SignalResult};

// ── PhaseTimer ────────────────────────────────────────────────────────────────

/// Mutable timing state, fresh for every episode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PhaseTimer {
    /// Simulation steps since the last decision or phase commit.
    pub elapsed:        u32,
    pub is_yellow:      bool,
    /// Last action decided; `None` before the first decision.
    pub current_action: Option<Action>,
    /// Action whose green follows the running yellow.
    pub pending_action: Option<Action>,
}

impl PhaseTimer {
    /// No previous action, with `elapsed` pre-loaded so the first check
    /// decides.
    pub fn initial(green_duration: u32) -> Self {
        Self {
            elapsed:        green_duration,
            is_yellow:      false,
            current_action: None,
            pending_action: None,
        }
    }
}

// ── PhaseController ───────────────────────────────────────────────────────────

/// State machine driving the phases of one agent's junctions.
///
/// In the independent layouts an agent owns exactly one junction, so there
/// is one controller per junction with its own timer.  In the shared layout
/// one controller covers both junctions and each decision addresses the
/// junction its action selects.
///
/// The controller never talks to the simulation: it returns
/// [`PhaseCommand`]s that the orchestrator forwards.
#[derive(Clone, Debug)]
pub struct PhaseController {
    agent:           AgentId,
    space:           ActionSpace,
    green_duration:  u32,
    yellow_duration: u32,
    timer:           PhaseTimer,
    /// Phase shown at each junction of `space`, by slot.
    displayed:       Vec<Option<Phase>>,
}

impl PhaseController {
    pub fn new(
        agent:           AgentId,
        space:           ActionSpace,
        green_duration:  u32,
        yellow_duration: u32,
    ) -> SignalResult<Self> {
        if space.junctions().is_empty() {
            return Err(SignalError::NoJunctions(agent));
        }
        let displayed = vec![None; space.junctions().len()];
        Ok(Self {
            agent,
            space,
            green_duration,
            yellow_duration,
            timer: PhaseTimer::initial(green_duration),
            displayed,
        })
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn space(&self) -> &ActionSpace {
        &self.space
    }

    pub fn timer(&self) -> PhaseTimer {
        self.timer
    }

    /// `true` when a green has run for at least `green_duration`.
    pub fn decision_due(&self) -> bool {
        !self.timer.is_yellow && self.timer.elapsed >= self.green_duration
    }

    /// Last action decided, `None` before the first decision.
    pub fn last_action(&self) -> Option<Action> {
        self.timer.current_action
    }

    /// Phase currently shown at `junction`, `None` before the first command.
    pub fn displayed(&self, junction: JunctionId) -> Option<Phase> {
        self.space.slot_of(junction).and_then(|slot| self.displayed[slot])
    }

    /// Apply a freshly chosen `action` and reset the decision window.
    ///
    /// A changed action starts the yellow of the previous action at the
    /// previous action's junction; the returned command is `None` when
    /// there is no previous action or the action is unchanged.
    pub fn commit_decision(&mut self, action: Action) -> SignalResult<Option<PhaseCommand>> {
        self.space.resolve(action)?;
        self.timer.elapsed = 0;

        let previous = self.timer.current_action;
        if previous == Some(action) {
            debug!(agent = %self.agent, %action, "phase kept");
            return Ok(None);
        }

        self.timer.current_action = Some(action);
        self.timer.pending_action = Some(action);
        self.timer.is_yellow = true;

        let Some(old) = previous else {
            return Ok(None);
        };
        let (junction, local) = self.space.resolve(old)?;
        let command = PhaseCommand { junction, phase: Phase::Yellow(local) };
        self.show(command);
        debug!(agent = %self.agent, from = %old, to = %action, "yellow started");
        Ok(Some(command))
    }

    /// Finish a yellow that has run for `yellow_duration`, returning the
    /// pending action's green.
    pub fn poll_yellow(&mut self) -> SignalResult<Option<PhaseCommand>> {
        if !self.timer.is_yellow || self.timer.elapsed < self.yellow_duration {
            return Ok(None);
        }
        self.timer.is_yellow = false;
        self.timer.elapsed = 0;

        let Some(action) = self.timer.pending_action.take() else {
            return Ok(None);
        };
        let (junction, local) = self.space.resolve(action)?;
        let command = PhaseCommand { junction, phase: Phase::Green(local) };
        self.show(command);
        debug!(agent = %self.agent, %action, "green committed");
        Ok(Some(command))
    }

    /// Count `steps` simulation steps against the running phase.
    pub fn advance(&mut self, steps: u32) {
        self.timer.elapsed = self.timer.elapsed.saturating_add(steps);
    }

    fn show(&mut self, command: PhaseCommand) {
        if let Some(slot) = self.space.slot_of(command.junction) {
            self.displayed[slot] = Some(command.phase);
        }
    }
}
