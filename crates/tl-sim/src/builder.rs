//! Fluent builder for constructing an [`Orchestrator`].

use tracing::warn;

use tl_core::{AgentRng, ControlConfig, PerAgent, RngStream};
use tl_encode::StateEncoder;
use tl_memory::ReplayBank;
use tl_policy::ValueModel;
use tl_reward::RewardPolicy;

use crate::{EpisodeHistory, Orchestrator, RouteSource, SimResult, TrafficSim};

/// Fluent builder for [`Orchestrator<S, R, M>`].
///
/// # Required inputs
///
/// - [`ControlConfig`] — layout, mode, durations, replay settings, …
/// - `S: TrafficSim` — the simulation to drive
/// - `R: RouteSource` — per-episode route schedules
/// - `M: ValueModel` — the action-value model (any placeholder such as
///   [`tl_policy::ZeroModel`] for the baselines)
///
/// # Optional inputs
///
/// | Method             | Default               |
/// |--------------------|-----------------------|
/// | `.cross_weight(w)` | `config.cross_weight` |
///
/// # Example
///
/// ```rust,ignore
/// let mut orch = OrchestratorBuilder::new(config, sim, routes, model).build()?;
/// orch.run_episode(0, 1.0, &mut NoopObserver)?;
/// ```
pub struct OrchestratorBuilder<S: TrafficSim, R: RouteSource, M: ValueModel> {
    config:       ControlConfig,
    sim:          S,
    routes:       R,
    model:        M,
    cross_weight: Option<f64>,
}

impl<S: TrafficSim, R: RouteSource, M: ValueModel> OrchestratorBuilder<S, R, M> {
    pub fn new(config: ControlConfig, sim: S, routes: R, model: M) -> Self {
        Self { config, sim, routes, model, cross_weight: None }
    }

    /// Own-reward weight for the cross-blended reward, overriding the
    /// configured one.
    pub fn cross_weight(mut self, weight: f64) -> Self {
        self.cross_weight = Some(weight);
        self
    }

    /// Validate the configuration, resolve the reward mode against the
    /// layout and return a ready-to-run [`Orchestrator`].
    pub fn build(self) -> SimResult<Orchestrator<S, R, M>> {
        let mut config = self.config;
        if let Some(w) = self.cross_weight {
            config.cross_weight = w;
        }
        config.validate()?;

        let layout = config.make_layout();
        let reward_policy = RewardPolicy::from_code(config.reward_mode, config.cross_weight)?;
        reward_policy.check_layout(layout.junctions.len(), layout.agent_count())?;

        for agent in layout.agents.values() {
            if config.num_states < agent.states_required() {
                warn!(
                    agent = %agent.agent,
                    num_states = config.num_states,
                    required = agent.states_required(),
                    "state vector shorter than the lane groups it covers; far cells are dropped"
                );
            }
        }

        let agent_count = layout.agent_count();
        let encoders = PerAgent::from_fn(agent_count, |agent| {
            StateEncoder::new(layout.agent(agent).clone(), config.num_states, config.road_length)
        });
        let memory = ReplayBank::new(
            agent_count,
            config.memory_size_min,
            config.memory_size_max,
            config.seed,
        )?;
        let policy_rngs =
            PerAgent::from_fn(agent_count, |agent| AgentRng::new(config.seed, agent, RngStream::Policy));

        Ok(Orchestrator {
            encoders,
            reward_policy,
            memory,
            policy_rngs,
            history: EpisodeHistory::new(agent_count),
            sim: self.sim,
            routes: self.routes,
            model: self.model,
            layout,
            config,
        })
    }
}
