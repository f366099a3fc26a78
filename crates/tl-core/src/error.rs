//! Workspace error type.
//!
//! Sub-crates define their own error enums and wrap `TlError` as one
//! variant.  The simulation and model ports report failures through
//! `TlError::Simulation` / `TlError::Model`; both are fatal to the episode.

use std::path::PathBuf;

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `tl-core` and the external ports.
#[derive(Debug, Error)]
pub enum TlError {
    #[error("{0} is not part of this layout")]
    UnknownAgent(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("simulation error: {0}")]
    Simulation(String),

    #[error("value model error: {0}")]
    Model(String),

    #[error("no trained model found at {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `tl-*` crates.
pub type TlResult<T> = Result<T, TlError>;
