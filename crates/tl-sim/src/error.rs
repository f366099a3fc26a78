use thiserror::Error;

use tl_core::{JunctionId, TlError};
use tl_memory::MemoryError;
use tl_reward::RewardError;
use tl_signal::SignalError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] TlError),

    #[error("replay memory: {0}")]
    Memory(#[from] MemoryError),

    #[error("reward: {0}")]
    Reward(#[from] RewardError),

    #[error("signal: {0}")]
    Signal(#[from] SignalError),

    #[error("{0} is not part of the layout")]
    UnknownJunction(JunctionId),
}

pub type SimResult<T> = Result<T, SimError>;
