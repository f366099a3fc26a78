//! `tl-policy` — choosing an action per agent.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`model`]    | `ValueModel` port, `LoadModel`, `argmax`                |
//! | [`noop`]     | `ZeroModel` — constant predictions, ignores training    |
//! | [`policy`]   | `ActionPolicy`                                          |
//! | [`schedule`] | `EpsilonSchedule`                                       |
//!
//! The value approximator itself lives outside this workspace; anything
//! implementing [`ValueModel`] can drive the control loop.

pub mod model;
pub mod noop;
pub mod policy;
pub mod schedule;


pub use model::{LoadModel, ValueModel, argmax};
pub use noop::ZeroModel;
pub use policy::ActionPolicy;
pub use schedule::EpsilonSchedule;
