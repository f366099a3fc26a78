//! `tl-sim` — the episode loop.
//!
//! # Control tick
//!
//! ```text
//! while step < max_steps:
//!   ① Decide  — for every agent whose green has run ≥ green_duration:
//!                snapshot vehicles once, refresh waiting-time tables,
//!                compute rewards, encode the agent's state, store
//!                (prev_state, prev_action, reward, state) when learning,
//!                choose an action, commit it (yellow of the old action).
//!   ② Yellow  — every controller whose yellow ran ≥ yellow_duration
//!                commits the pending green.
//!   ③ Advance — step the simulation one step at a time, up to step_size
//!                steps, summing halted vehicles per agent after each.
//! close simulation; when learning, run `training_epochs` replay passes.
//! ```
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`ports`]        | `TrafficSim`, `RouteSource`, `observe`                |
//! | [`builder`]      | `OrchestratorBuilder`                                 |
//! | [`orchestrator`] | `Orchestrator`, `EpisodeReport`                       |
//! | [`replay`]       | one-step Bellman targets and batch training           |
//! | [`stats`]        | `EpisodeStats`, `EpisodeSummary`, `EpisodeHistory`    |
//! | [`observer`]     | `EpisodeObserver`, `NoopObserver`, `TraceRecorder`    |
//! | [`error`]        | `SimError`, `SimResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut orch = OrchestratorBuilder::new(config, sim, routes, model).build()?;
//! orch.run_training_session(EpsilonSchedule::Linear { total_episodes: 100 }, 100, &mut NoopObserver)?;
//! orch.model().save(Path::new("models/model_1"))?;
//! ```

pub mod builder;
pub mod error;
mod episode;
pub mod observer;
pub mod orchestrator;
pub mod ports;
pub mod replay;
pub mod stats;


pub use builder::OrchestratorBuilder;
pub use error::{SimError, SimResult};
pub use observer::{EpisodeObserver, NoopObserver, TraceRecorder};
pub use orchestrator::{EpisodeReport, Orchestrator};
pub use ports::{RouteSource, TrafficSim, observe};
pub use stats::{AgentHistory, AgentSummary, AgentTotals, EpisodeHistory, EpisodeStats, EpisodeSummary};
