//! Exploration-rate schedules across training episodes.

/// Epsilon for each training episode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EpsilonSchedule {
    /// The same epsilon every episode.
    Constant(f64),
    /// `1 − episode / total_episodes`, from full exploration down towards
    /// greedy.
    Linear { total_episodes: u32 },
}

impl EpsilonSchedule {
    /// Epsilon for zero-based `episode`, clamped to `[0, 1]`.
    pub fn epsilon(self, episode: u32) -> f64 {
        let eps = match self {
            EpsilonSchedule::Constant(e) => e,
            EpsilonSchedule::Linear { total_episodes: 0 } => 0.0,
            EpsilonSchedule::Linear { total_episodes } => {
                1.0 - f64::from(episode) / f64::from(total_episodes)
            }
        };
        eps.clamp(0.0, 1.0)
    }
}
