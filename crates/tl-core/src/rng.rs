//! Deterministic per-agent RNG.
//!
//! Each agent gets its own `SmallRng` seeded by
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT) XOR stream
//!
//! so the policy's exploration draws and the replay memory's sampling draws
//! never share state, and adding a second agent does not disturb the first
//! agent's sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Independent RNG streams derived from one seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RngStream {
    Policy,
    Replay,
}

impl RngStream {
    fn salt(self) -> u64 {
        match self {
            RngStream::Policy => 0,
            RngStream::Replay => 0x5bd1_e995_0000_0000,
        }
    }
}

/// Per-agent deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed, an agent and a stream.
    pub fn new(global_seed: u64, agent: AgentId, stream: RngStream) -> Self {
        let seed = global_seed
            ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT)
            ^ stream.salt();
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` helpers
    /// (`choose_multiple`, distributions, …).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
