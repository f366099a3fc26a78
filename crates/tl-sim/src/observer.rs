//! Episode observer trait for progress reporting and data collection.

use tl_core::{Action, AgentId, PerAgent, State};

use crate::EpisodeSummary;

/// Callbacks invoked by [`Orchestrator::run_episode`][crate::Orchestrator::run_episode].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — decision counter
///
/// ```rust,ignore
/// struct Count(usize);
///
/// impl EpisodeObserver for Count {
///     fn on_decision(&mut self, _: u64, _: AgentId, _: &State, _: Action, _: f64) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait EpisodeObserver {
    /// Called after the simulation was reset, before the first tick.
    fn on_episode_start(&mut self, _episode: u32, _epsilon: f64) {}

    /// Called once per agent decision with the state it decided on, the
    /// chosen action and the reward for its previous action.
    fn on_decision(
        &mut self,
        _step:   u64,
        _agent:  AgentId,
        _state:  &State,
        _action: Action,
        _reward: f64,
    ) {}

    /// Called after every single simulation step with each agent's halted
    /// vehicle count.
    fn on_step(&mut self, _step: u64, _queues: &PerAgent<f64>) {}

    /// Called once the simulation is closed, before replay training.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {}
}

/// An [`EpisodeObserver`] that does nothing.
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}

// ── TraceRecorder ─────────────────────────────────────────────────────────────

/// Per-step and per-decision series of one evaluation episode.
///
/// Records, for each agent, the halted-vehicle count after every step, the
/// reward and action of every decision, and the cross-agent queue total per
/// step.  Cleared at every episode start.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    pub queues:      PerAgent<Vec<f64>>,
    pub total_queue: Vec<f64>,
    pub rewards:     PerAgent<Vec<f64>>,
    pub actions:     PerAgent<Vec<Action>>,
}

impl TraceRecorder {
    pub fn new(agent_count: usize) -> Self {
        Self {
            queues:      PerAgent::from_fn(agent_count, |_| Vec::new()),
            total_queue: Vec::new(),
            rewards:     PerAgent::from_fn(agent_count, |_| Vec::new()),
            actions:     PerAgent::from_fn(agent_count, |_| Vec::new()),
        }
    }
}

impl EpisodeObserver for TraceRecorder {
    fn on_episode_start(&mut self, _episode: u32, _epsilon: f64) {
        *self = TraceRecorder::new(self.queues.len());
    }

    fn on_decision(&mut self, _step: u64, agent: AgentId, _state: &State, action: Action, reward: f64) {
        if let Some(r) = self.rewards.get_mut(agent) {
            r.push(reward);
        }
        if let Some(a) = self.actions.get_mut(agent) {
            a.push(action);
        }
    }

    fn on_step(&mut self, _step: u64, queues: &PerAgent<f64>) {
        for (agent, &q) in queues.iter() {
            if let Some(series) = self.queues.get_mut(agent) {
                series.push(q);
            }
        }
        self.total_queue.push(queues.values().sum());
    }
}
