//! Control-loop configuration.
//!
//! Typically loaded from a JSON file by the application crate (enable the
//! `serde` feature) and passed to the orchestrator builder.

use crate::layout::{Layout, LayoutKind};
use crate::{TlError, TlResult};

// ── ControlMode ───────────────────────────────────────────────────────────────

/// How actions are chosen and whether the run learns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControlMode {
    /// Epsilon-greedy over the value model; transitions are stored and the
    /// model is retrained after every episode.
    Training,
    /// Uniformly random actions.  Non-learning reference.
    RandomBaseline,
    /// Fixed round-robin phases.  Non-learning reference.
    CyclicBaseline,
    /// Greedy argmax over a previously trained model; nothing is stored.
    Evaluation,
}

impl ControlMode {
    /// Whether transitions go to replay memory and replay runs post-episode.
    #[inline]
    pub fn is_learning(self) -> bool {
        matches!(self, ControlMode::Training)
    }
}

// ── ControlConfig ─────────────────────────────────────────────────────────────

/// Top-level control-loop configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlConfig {
    pub layout: LayoutKind,
    pub mode:   ControlMode,

    /// Reward mode code `0..=4`; resolved by `tl-reward`.
    pub reward_mode:  u8,
    /// Own-reward weight for the cross-blended reward (mode 4).  The other
    /// agent gets `1 - cross_weight`.
    pub cross_weight: f64,

    /// Step ceiling for one episode.
    pub max_steps:       u64,
    /// Minimum green time before a new decision, in simulation steps.
    pub green_duration:  u32,
    /// Yellow time between two different greens, in simulation steps.
    pub yellow_duration: u32,
    /// Simulation steps advanced per control tick.
    pub step_size:       u32,

    /// State vector length per agent (80 single junction, 160 shared).
    pub num_states:  usize,
    /// Action space size per agent (4, or 8 for the shared layout).
    pub num_actions: usize,

    /// Discount factor for the one-step Bellman backup.
    pub gamma:           f64,
    /// Replay passes after each training episode.
    pub training_epochs: u32,
    pub batch_size:      usize,
    /// Replay memory must hold this many samples before it yields batches.
    pub memory_size_min: usize,
    /// Oldest samples are evicted beyond this size.
    pub memory_size_max: usize,

    /// Steps each phase is held by the cyclic baseline.
    pub fixed_phase_duration: u64,
    /// Length of every incoming road, in metres.
    pub road_length:          f64,

    /// Master RNG seed for policies and replay sampling.
    pub seed:              u64,
    /// Route seed used for evaluation runs.
    pub test_episode_seed: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            layout:               LayoutKind::DualIndependent,
            mode:                 ControlMode::Training,
            reward_mode:          0,
            cross_weight:         0.7,
            max_steps:            5_400,
            green_duration:       10,
            yellow_duration:      4,
            step_size:            2,
            num_states:           80,
            num_actions:          4,
            gamma:                0.75,
            training_epochs:      800,
            batch_size:           100,
            memory_size_min:      600,
            memory_size_max:      50_000,
            fixed_phase_duration: 80,
            road_length:          750.0,
            seed:                 42,
            test_episode_seed:    10_000,
        }
    }
}

impl ControlConfig {
    /// Resolve the layout described by `self.layout`.
    pub fn make_layout(&self) -> Layout {
        Layout::new(self.layout)
    }

    /// Check internal consistency and consistency with the layout.
    pub fn validate(&self) -> TlResult<()> {
        if self.step_size == 0 {
            return Err(TlError::Config("step_size must be at least 1".into()));
        }
        if self.max_steps == 0 {
            return Err(TlError::Config("max_steps must be at least 1".into()));
        }
        if self.green_duration == 0 {
            return Err(TlError::Config("green_duration must be at least 1".into()));
        }
        if self.num_states == 0 || self.num_actions == 0 {
            return Err(TlError::Config("num_states and num_actions must be non-zero".into()));
        }
        if self.memory_size_max == 0 || self.memory_size_min > self.memory_size_max {
            return Err(TlError::Config(format!(
                "memory bounds invalid: min {} max {}",
                self.memory_size_min, self.memory_size_max
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(TlError::Config(format!("gamma {} outside [0, 1]", self.gamma)));
        }
        if !(0.0..=1.0).contains(&self.cross_weight) {
            return Err(TlError::Config(format!(
                "cross_weight {} outside [0, 1]",
                self.cross_weight
            )));
        }
        if self.fixed_phase_duration == 0 {
            return Err(TlError::Config("fixed_phase_duration must be at least 1".into()));
        }
        if self.road_length <= 0.0 {
            return Err(TlError::Config("road_length must be positive".into()));
        }

        let layout = self.make_layout();
        for agent in layout.agents.values() {
            let needed = agent.actions_required();
            if self.num_actions != needed {
                return Err(TlError::Config(format!(
                    "{} controls {} junction(s) and needs num_actions = {needed}, got {}",
                    agent.agent,
                    agent.junctions.len(),
                    self.num_actions
                )));
            }
        }
        Ok(())
    }
}
