//! `tl-signal` — signal phases and the per-agent phase state machine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`phase`]      | `Phase`, `PhaseCommand`                               |
//! | [`space`]      | `ActionSpace` — action → (junction, local phase)      |
//! | [`controller`] | `PhaseTimer`, `PhaseController`                       |
//! | [`error`]      | `SignalError`, `SignalResult<T>`                      |
//!
//! # State machine
//!
//! ```text
//!            elapsed ≥ green, new action ≠ current
//!   GREEN(a) ───────────────────────────────────────► YELLOW(a → b)
//!      ▲  │                                              │
//!      │  └── same action: reset elapsed, stay GREEN     │ elapsed ≥ yellow
//!      └─────────────────────────────────────────────────┘ commit GREEN(b)
//! ```
//!
//! The initial state has no current action and `elapsed` pre-loaded to the
//! green duration, so the first tick always decides.

pub mod controller;
pub mod error;
pub mod phase;
pub mod space;

#[cfg(test)]
mod tests;

pub use controller::{PhaseController, PhaseTimer};
pub use error::{SignalError, SignalResult};
pub use phase::{Phase, PhaseCommand};
pub use space::ActionSpace;
