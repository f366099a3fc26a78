//! Plain row types shared by output backends.

/// Label used in the `agent` column for the cross-agent total.
pub const TOTAL: &str = "total";

/// One agent's (or the total's) figures for one finished episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeRow {
    pub episode:         u32,
    /// Agent number, or [`TOTAL`].
    pub agent:           String,
    pub neg_reward:      f64,
    pub cumulative_wait: f64,
    pub avg_queue:       f64,
}

/// One agent decision.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionRow {
    pub episode:  u32,
    pub step:     u64,
    pub agent:    u8,
    pub action:   u16,
    pub reward:   f64,
    /// Occupied cells in the state decided on.
    pub occupied: usize,
}

/// Halted vehicles on one agent's roads after one simulation step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRow {
    pub episode: u32,
    pub step:    u64,
    pub agent:   u8,
    pub queue:   f64,
}
