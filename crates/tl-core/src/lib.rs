//! `tl-core` — foundational types for the traffic-signal RL workspace.
//!
//! This crate is a dependency of every other `tl-*` crate.  It has no `tl-*`
//! dependencies and minimal external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `JunctionId`, `Action`                     |
//! | [`per_agent`]   | `PerAgent<T>` dense per-agent storage                 |
//! | [`state`]       | `State` occupancy vector, `Transition`                |
//! | [`layout`]      | `LayoutKind`, `Layout`, `AgentLayout`, `Approach`     |
//! | [`observation`] | `VehicleObservation`                                  |
//! | [`config`]      | `ControlConfig`, `ControlMode`                        |
//! | [`rng`]         | `AgentRng`, `RngStream`                               |
//! | [`error`]       | `TlError`, `TlResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and configuration.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod layout;
pub mod observation;
pub mod per_agent;
pub mod rng;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ControlConfig, ControlMode};
pub use error::{TlError, TlResult};
pub use ids::{Action, AgentId, JunctionId};
pub use layout::{AgentLayout, Approach, Junction, Layout, LayoutKind};
pub use observation::VehicleObservation;
pub use per_agent::PerAgent;
pub use rng::{AgentRng, RngStream};
pub use state::{State, Transition};
