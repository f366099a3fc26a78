//! State owned by one running episode.
//!
//! Everything here is created at episode start and dropped at episode end,
//! so timers, waiting-time tables and reward baselines can never leak from
//! one episode into the next.

use tl_core::{Action, ControlConfig, Layout, PerAgent, State};
use tl_reward::{RewardCalculator, RewardPolicy, WaitingTimeTable};
use tl_signal::{ActionSpace, PhaseController};

use crate::{EpisodeStats, SimResult};

pub(crate) struct EpisodeRun {
    pub controllers:      PerAgent<PhaseController>,
    pub tables:           PerAgent<WaitingTimeTable>,
    pub rewards:          RewardCalculator,
    pub stats:            EpisodeStats,
    /// State and action of each agent's previous decision.
    pub previous:         PerAgent<Option<(State, Action)>>,
    /// Last local action chosen at each junction, by junction index.
    pub junction_actions: Vec<Option<Action>>,
}

impl EpisodeRun {
    pub fn new(layout: &Layout, config: &ControlConfig, policy: RewardPolicy) -> SimResult<Self> {
        let agent_count = layout.agent_count();
        let mut controllers = Vec::with_capacity(agent_count);
        for agent in layout.agents.values() {
            controllers.push(PhaseController::new(
                agent.agent,
                ActionSpace::for_agent(agent),
                config.green_duration,
                config.yellow_duration,
            )?);
        }
        Ok(Self {
            controllers:      PerAgent::from_vec(controllers),
            tables:           PerAgent::from_fn(agent_count, |_| WaitingTimeTable::new()),
            rewards:          RewardCalculator::new(policy, agent_count),
            stats:            EpisodeStats::new(agent_count, config.max_steps),
            previous:         PerAgent::from_fn(agent_count, |_| None),
            junction_actions: vec![None; layout.junctions.len()],
        })
    }
}
