//! Reward modes, resolved once from their configuration code.

use tracing::error;

use tl_core::Action;

use crate::{RewardError, RewardResult};

/// Fraction of the base reward added (with a negative sign) when the two
/// junctions' last actions satisfy the coordination relation.
pub const COORDINATION_FACTOR: f64 = -0.25;

/// Local phase indices of the two through-phases (north-south, east-west).
const THROUGH_NS: u16 = 0;
const THROUGH_EW: u16 = 2;

// ── Coordination ──────────────────────────────────────────────────────────────

/// Which pairing of the two junctions' through-phases triggers the bonus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coordination {
    /// One junction runs NS while the other runs EW.
    Perpendicular,
    /// Both junctions run the same through-phase.
    Parallel,
}

impl Coordination {
    /// `true` when the two local actions form this pairing.  A junction that
    /// has not chosen an action yet never matches.
    pub fn matches(self, a: Option<Action>, b: Option<Action>) -> bool {
        let (Some(a), Some(b)) = (a, b) else {
            return false;
        };
        match self {
            Coordination::Perpendicular => matches!(
                (a.0, b.0),
                (THROUGH_NS, THROUGH_EW) | (THROUGH_EW, THROUGH_NS)
            ),
            Coordination::Parallel => matches!(
                (a.0, b.0),
                (THROUGH_NS, THROUGH_NS) | (THROUGH_EW, THROUGH_EW)
            ),
        }
    }

    /// Bonus added to `base` when the pairing holds, `0.0` otherwise.
    pub fn bonus(self, base: f64, a: Option<Action>, b: Option<Action>) -> f64 {
        if self.matches(a, b) { COORDINATION_FACTOR * base } else { 0.0 }
    }
}

// ── RewardPolicy ──────────────────────────────────────────────────────────────

/// How raw waiting-time totals become per-agent rewards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RewardPolicy {
    /// Mode 0: `old_wait − current_wait`.
    WaitDelta,
    /// Mode 1: `−current_wait`.
    NegativeWait,
    /// Modes 2 and 3: wait delta plus a coordination bonus.
    Coordinated(Coordination),
    /// Mode 4: each agent's wait delta blended with the other agent's.
    CrossBlend { own_weight: f64 },
}

impl RewardPolicy {
    /// Resolve a configuration code.
    ///
    /// `own_weight` is only used by mode 4.  Unknown codes are reported with
    /// an `error!` diagnostic and rejected.
    pub fn from_code(code: u8, own_weight: f64) -> RewardResult<Self> {
        match code {
            0 => Ok(RewardPolicy::WaitDelta),
            1 => Ok(RewardPolicy::NegativeWait),
            2 => Ok(RewardPolicy::Coordinated(Coordination::Perpendicular)),
            3 => Ok(RewardPolicy::Coordinated(Coordination::Parallel)),
            4 => Ok(RewardPolicy::CrossBlend { own_weight }),
            other => {
                error!(code = other, "reward mode not defined");
                Err(RewardError::UnknownMode(other))
            }
        }
    }

    /// Configuration code of this policy.
    pub fn code(self) -> u8 {
        match self {
            RewardPolicy::WaitDelta => 0,
            RewardPolicy::NegativeWait => 1,
            RewardPolicy::Coordinated(Coordination::Perpendicular) => 2,
            RewardPolicy::Coordinated(Coordination::Parallel) => 3,
            RewardPolicy::CrossBlend { .. } => 4,
        }
    }

    /// Refuse policies the layout cannot support.
    ///
    /// Coordination needs two junctions; cross-blending needs two agents.
    pub fn check_layout(self, junctions: usize, agents: usize) -> RewardResult<()> {
        let reason = match self {
            RewardPolicy::Coordinated(_) if junctions < 2 => "coordination needs two junctions",
            RewardPolicy::CrossBlend { .. } if agents < 2 => "cross-blending needs two agents",
            _ => return Ok(()),
        };
        Err(RewardError::Incompatible { mode: self.code(), reason })
    }
}
