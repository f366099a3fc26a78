use thiserror::Error;

use tl_core::AgentId;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("no replay memory for {0}")]
    UnknownAgent(AgentId),

    #[error("replay memory bounds invalid: min {min} > max {max}")]
    Bounds { min: usize, max: usize },
}

pub type MemoryResult<T> = Result<T, MemoryError>;
