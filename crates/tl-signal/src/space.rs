//! `ActionSpace` — how an agent's actions address junctions.

use tl_core::layout::ACTIONS_PER_JUNCTION;
use tl_core::{Action, AgentLayout, JunctionId};

use crate::{SignalError, SignalResult};

/// The junctions an agent controls, in action-offset order.
///
/// Action `a` addresses junction `a / 4` with local phase `a % 4`; with a
/// single junction this is the identity, with two junctions actions `4..8`
/// address the second one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSpace {
    junctions: Vec<JunctionId>,
}

impl ActionSpace {
    pub fn new(junctions: Vec<JunctionId>) -> Self {
        Self { junctions }
    }

    pub fn for_agent(layout: &AgentLayout) -> Self {
        Self::new(layout.junctions.clone())
    }

    pub fn size(&self) -> usize {
        self.junctions.len() * ACTIONS_PER_JUNCTION
    }

    pub fn junctions(&self) -> &[JunctionId] {
        &self.junctions
    }

    /// Position of `junction` within this space, if controlled.
    pub fn slot_of(&self, junction: JunctionId) -> Option<usize> {
        self.junctions.iter().position(|&j| j == junction)
    }

    /// `(junction, local phase index)` addressed by `action`.
    pub fn resolve(&self, action: Action) -> SignalResult<(JunctionId, u8)> {
        let slot = action.index() / ACTIONS_PER_JUNCTION;
        let junction = self.junctions.get(slot).copied().ok_or(SignalError::UnknownAction {
            action,
            size: self.size(),
        })?;
        Ok((junction, (action.index() % ACTIONS_PER_JUNCTION) as u8))
    }
}
