use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewardError {
    #[error("unknown reward mode {0} (expected 0..=4)")]
    UnknownMode(u8),

    #[error("reward mode {mode} is not usable with this layout: {reason}")]
    Incompatible { mode: u8, reason: &'static str },

    #[error("expected {expected} per-agent wait totals, got {got}")]
    AgentCountMismatch { expected: usize, got: usize },
}

pub type RewardResult<T> = Result<T, RewardError>;
