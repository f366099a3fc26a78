use thiserror::Error;

use tl_core::{Action, AgentId};

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("action {action} outside an action space of {size}")]
    UnknownAction { action: Action, size: usize },

    #[error("{0} controls no junction")]
    NoJunctions(AgentId),
}

pub type SignalResult<T> = Result<T, SignalError>;
