//! `ActionPolicy` — how an agent picks its next action.

use tracing::trace;

use tl_core::{Action, AgentId, AgentRng, ControlMode, State, TlError, TlResult};

use crate::{ValueModel, argmax};

/// Action-selection rule, chosen per run.
///
/// Swapping the variant changes nothing else in the loop: every variant is
/// asked the same question with the same inputs, and the ones that do not
/// need the model or RNG simply ignore them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActionPolicy {
    /// Random action with probability `epsilon`, model argmax otherwise.
    EpsilonGreedy { epsilon: f64 },
    /// Uniformly random action.
    Random,
    /// `(step / fixed_phase_duration) mod num_actions`.
    Cyclic { fixed_phase_duration: u64 },
    /// Model argmax, never explores.
    Greedy,
}

impl ActionPolicy {
    /// The policy used by `mode`.
    ///
    /// `epsilon` only matters for [`ControlMode::Training`].
    pub fn for_mode(mode: ControlMode, epsilon: f64, fixed_phase_duration: u64) -> Self {
        match mode {
            ControlMode::Training => ActionPolicy::EpsilonGreedy { epsilon },
            ControlMode::RandomBaseline => ActionPolicy::Random,
            ControlMode::CyclicBaseline => ActionPolicy::Cyclic { fixed_phase_duration },
            ControlMode::Evaluation => ActionPolicy::Greedy,
        }
    }

    /// Whether [`choose`][Self::choose] may call the model.
    pub fn uses_model(self) -> bool {
        matches!(self, ActionPolicy::EpsilonGreedy { .. } | ActionPolicy::Greedy)
    }

    /// Pick an action in `0..num_actions` for `agent`.
    ///
    /// `step` is the simulation step of the decision.
    pub fn choose<M: ValueModel + ?Sized>(
        self,
        agent:       AgentId,
        state:       &State,
        step:        u64,
        num_actions: usize,
        model:       &M,
        rng:         &mut AgentRng,
    ) -> TlResult<Action> {
        if num_actions == 0 {
            return Err(TlError::Config("num_actions must be non-zero".into()));
        }
        let index = match self {
            ActionPolicy::EpsilonGreedy { epsilon } => {
                if rng.unit() < epsilon {
                    rng.gen_range(0..num_actions)
                } else {
                    greedy(agent, state, num_actions, model)?
                }
            }
            ActionPolicy::Random => rng.gen_range(0..num_actions),
            ActionPolicy::Cyclic { fixed_phase_duration } => {
                let period = fixed_phase_duration.max(1);
                ((step / period) % num_actions as u64) as usize
            }
            ActionPolicy::Greedy => greedy(agent, state, num_actions, model)?,
        };
        trace!(%agent, step, action = index, "action chosen");
        to_action(index)
    }
}

fn greedy<M: ValueModel + ?Sized>(
    agent:       AgentId,
    state:       &State,
    num_actions: usize,
    model:       &M,
) -> TlResult<usize> {
    let q = model.predict_one(agent, state)?;
    if q.len() != num_actions {
        return Err(TlError::Model(format!(
            "{agent}: model predicted {} values for {num_actions} actions",
            q.len()
        )));
    }
    argmax(&q)
}

fn to_action(index: usize) -> TlResult<Action> {
    Action::try_from(index).map_err(|_| TlError::Config(format!("action {index} out of range")))
}
