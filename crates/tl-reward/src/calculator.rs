//! `RewardCalculator` — per-agent rewards for one episode.

use tracing::trace;

use tl_core::{Action, PerAgent};

use crate::{RewardError, RewardPolicy, RewardResult};

/// Turns per-agent waiting-time totals into rewards under a fixed
/// [`RewardPolicy`].
///
/// Holds each agent's previous total as the baseline for the next delta.
/// Create one per episode; baselines start at zero.
#[derive(Clone, Debug)]
pub struct RewardCalculator {
    policy:    RewardPolicy,
    last_wait: PerAgent<f64>,
}

impl RewardCalculator {
    pub fn new(policy: RewardPolicy, agent_count: usize) -> Self {
        Self {
            policy,
            last_wait: PerAgent::filled(agent_count, 0.0),
        }
    }

    pub fn policy(&self) -> RewardPolicy {
        self.policy
    }

    /// Baseline totals the next call will subtract from.
    pub fn last_wait(&self) -> &PerAgent<f64> {
        &self.last_wait
    }

    /// Compute one reward per agent from `current_wait` and store it as the
    /// new baseline.
    ///
    /// `junction_actions` holds the last local action (`0..4`) chosen at
    /// each junction, indexed by junction; only coordination policies read
    /// it.
    pub fn compute(
        &mut self,
        current_wait:     &PerAgent<f64>,
        junction_actions: &[Option<Action>],
    ) -> RewardResult<PerAgent<f64>> {
        if current_wait.len() != self.last_wait.len() {
            return Err(RewardError::AgentCountMismatch {
                expected: self.last_wait.len(),
                got:      current_wait.len(),
            });
        }

        let base = current_wait.map(|agent, &now| self.last_wait[agent] - now);

        let rewards = match self.policy {
            RewardPolicy::WaitDelta => base,
            RewardPolicy::NegativeWait => current_wait.map(|_, &now| -now),
            RewardPolicy::Coordinated(relation) => {
                let first = junction_actions.first().copied().flatten();
                let second = junction_actions.get(1).copied().flatten();
                base.map(|_, &b| b + relation.bonus(b, first, second))
            }
            RewardPolicy::CrossBlend { own_weight } => {
                let others = base.len().saturating_sub(1).max(1) as f64;
                let total: f64 = base.values().sum();
                base.map(|_, &own| {
                    let other = (total - own) / others;
                    own_weight * own + (1.0 - own_weight) * other
                })
            }
        };

        trace!(?rewards, ?current_wait, "rewards computed");
        self.last_wait = current_wait.clone();
        Ok(rewards)
    }
}
