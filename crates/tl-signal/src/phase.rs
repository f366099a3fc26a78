//! Signal phases and the numeric codes the simulation understands.

use tl_core::JunctionId;

/// One junction's displayed phase, by local action index `0..4`.
///
/// The numeric code is only computed at the simulation boundary: the phase
/// table of every junction lists each green immediately followed by its
/// yellow, so green `a` is `2a` and yellow `a` is `2a + 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Green(u8),
    Yellow(u8),
}

impl Phase {
    /// Phase index in the junction's program.
    #[inline]
    pub fn code(self) -> u32 {
        match self {
            Phase::Green(a) => u32::from(a) * 2,
            Phase::Yellow(a) => u32::from(a) * 2 + 1,
        }
    }

    pub fn is_yellow(self) -> bool {
        matches!(self, Phase::Yellow(_))
    }

    pub fn local_action(self) -> u8 {
        match self {
            Phase::Green(a) | Phase::Yellow(a) => a,
        }
    }
}

/// "Show `phase` at `junction`", emitted by a [`PhaseController`][crate::PhaseController].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PhaseCommand {
    pub junction: JunctionId,
    pub phase:    Phase,
}
