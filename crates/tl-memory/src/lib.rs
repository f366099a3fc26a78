//! `tl-memory` — bounded experience replay.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`replay`] | `ReplayMemory` (one FIFO store), `ReplayBank` (per agent) |
//! | [`error`]  | `MemoryError`, `MemoryResult<T>`                          |
//!
//! # Semantics (summary)
//!
//! ```text
//! add(t)        → push back; if len > max_size, pop front (oldest)
//! sample(n)     → []                               if len < min_size
//!               → min(n, len) distinct transitions otherwise
//! ```

pub mod error;
pub mod replay;

#[cfg(test)]
mod tests;

pub use error::{MemoryError, MemoryResult};
pub use replay::{ReplayBank, ReplayMemory};
