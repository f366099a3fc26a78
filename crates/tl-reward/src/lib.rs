//! `tl-reward` — per-agent rewards from waiting-time deltas.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`waiting`]    | `WaitingTimeTable` — vehicle id → accumulated wait     |
//! | [`policy`]     | `RewardPolicy`, `Coordination` (mode codes `0..=4`)    |
//! | [`calculator`] | `RewardCalculator` — baselines + policy, one episode   |
//! | [`error`]      | `RewardError`, `RewardResult<T>`                       |
//!
//! # Reward modes
//!
//! ```text
//! 0  WaitDelta         r = old_wait − current_wait
//! 1  NegativeWait      r = −current_wait
//! 2  Coordinated(⊥)    r = base + bonus   if last actions are {0,2} / {2,0}
//! 3  Coordinated(∥)    r = base + bonus   if last actions are {0,0} / {2,2}
//! 4  CrossBlend(w)     r_i = w·base_i + (1 − w)·base_j
//!
//! base = mode-0 reward, bonus = −0.25 × base
//! ```

pub mod calculator;
pub mod error;
pub mod policy;
pub mod waiting;


pub use calculator::RewardCalculator;
pub use error::{RewardError, RewardResult};
pub use policy::{COORDINATION_FACTOR, Coordination, RewardPolicy};
pub use waiting::WaitingTimeTable;
