//! Per-episode accumulators and the cross-episode history handed to
//! reporting.

use tl_core::{AgentId, PerAgent};

// ── AgentTotals ───────────────────────────────────────────────────────────────

/// Raw accumulators for one agent over one episode.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AgentTotals {
    /// Sum of negative rewards, one term per decision.
    pub neg_reward:   f64,
    /// Halted vehicles summed over every simulation step.
    pub queue:        f64,
    /// Seconds waited: one halted vehicle for one step is one second.
    pub waiting_time: f64,
}

impl std::ops::Add for AgentTotals {
    type Output = AgentTotals;

    fn add(self, other: AgentTotals) -> AgentTotals {
        AgentTotals {
            neg_reward:   self.neg_reward + other.neg_reward,
            queue:        self.queue + other.queue,
            waiting_time: self.waiting_time + other.waiting_time,
        }
    }
}

// ── EpisodeStats ──────────────────────────────────────────────────────────────

/// Accumulators for the running episode.
#[derive(Clone, Debug)]
pub struct EpisodeStats {
    agents:    PerAgent<AgentTotals>,
    max_steps: u64,
}

impl EpisodeStats {
    pub fn new(agent_count: usize, max_steps: u64) -> Self {
        Self {
            agents: PerAgent::filled(agent_count, AgentTotals::default()),
            max_steps,
        }
    }

    /// Count `reward` towards the episode's negative-reward sum.
    pub fn record_reward(&mut self, agent: AgentId, reward: f64) {
        if reward < 0.0 {
            self.agents[agent].neg_reward += reward;
        }
    }

    /// Add one simulation step's halted-vehicle count.
    pub fn record_queue(&mut self, agent: AgentId, halted: f64) {
        let t = &mut self.agents[agent];
        t.queue += halted;
        t.waiting_time += halted;
    }

    pub fn agent(&self, agent: AgentId) -> AgentTotals {
        self.agents[agent]
    }

    /// Sum over all agents.
    pub fn total(&self) -> AgentTotals {
        self.agents
            .values()
            .fold(AgentTotals::default(), |acc, &t| acc + t)
    }

    /// Close the episode.
    pub fn finish(&self, episode: u32) -> EpisodeSummary {
        let summarize = |t: AgentTotals| AgentSummary {
            neg_reward:   t.neg_reward,
            waiting_time: t.waiting_time,
            avg_queue:    t.queue / self.max_steps.max(1) as f64,
        };
        EpisodeSummary {
            episode,
            agents: self.agents.map(|_, &t| summarize(t)),
            total:  summarize(self.total()),
        }
    }
}

// ── EpisodeSummary ────────────────────────────────────────────────────────────

/// Reported figures for one agent (or the total) over one episode.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AgentSummary {
    pub neg_reward:   f64,
    pub waiting_time: f64,
    /// Mean halted vehicles per simulation step.
    pub avg_queue:    f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeSummary {
    pub episode: u32,
    pub agents:  PerAgent<AgentSummary>,
    pub total:   AgentSummary,
}

// ── EpisodeHistory ────────────────────────────────────────────────────────────

/// One value per finished episode, for each reported series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentHistory {
    pub reward:          Vec<f64>,
    pub cumulative_wait: Vec<f64>,
    pub avg_queue:       Vec<f64>,
}

impl AgentHistory {
    fn push(&mut self, s: &AgentSummary) {
        self.reward.push(s.neg_reward);
        self.cumulative_wait.push(s.waiting_time);
        self.avg_queue.push(s.avg_queue);
    }

    pub fn len(&self) -> usize {
        self.reward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }
}

/// Histories for every agent plus the cross-agent total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeHistory {
    pub agents: PerAgent<AgentHistory>,
    pub total:  AgentHistory,
}

impl EpisodeHistory {
    pub fn new(agent_count: usize) -> Self {
        Self {
            agents: PerAgent::from_fn(agent_count, |_| AgentHistory::default()),
            total:  AgentHistory::default(),
        }
    }

    pub fn push(&mut self, summary: &EpisodeSummary) {
        for (agent, s) in summary.agents.iter() {
            if let Some(h) = self.agents.get_mut(agent) {
                h.push(s);
            }
        }
        self.total.push(&summary.total);
    }

    pub fn episodes(&self) -> usize {
        self.total.len()
    }
}
