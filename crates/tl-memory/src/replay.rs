//! `ReplayMemory` — FIFO transition store with random-subset retrieval.
//!
//! A `VecDeque` keeps eviction of the oldest sample O(1) regardless of
//! capacity (50 000 samples is a typical maximum).

use std::collections::VecDeque;

use rand::seq::index;

use tl_core::{AgentId, AgentRng, PerAgent, RngStream, Transition};

use crate::{MemoryError, MemoryResult};

// ── ReplayMemory ──────────────────────────────────────────────────────────────

/// One agent's bounded transition store.
#[derive(Debug, Clone)]
pub struct ReplayMemory {
    samples:  VecDeque<Transition>,
    min_size: usize,
    max_size: usize,
}

impl ReplayMemory {
    /// Create an empty memory that yields batches once it holds `min_size`
    /// samples and never holds more than `max_size`.
    pub fn new(min_size: usize, max_size: usize) -> MemoryResult<Self> {
        if max_size == 0 || min_size > max_size {
            return Err(MemoryError::Bounds { min: min_size, max: max_size });
        }
        Ok(Self {
            samples: VecDeque::with_capacity(max_size.min(4_096)),
            min_size,
            max_size,
        })
    }

    /// Append `sample`, evicting the single oldest entry on overflow.
    pub fn add(&mut self, sample: Transition) {
        self.samples.push_back(sample);
        if self.samples.len() > self.max_size {
            self.samples.pop_front();
        }
    }

    /// Draw up to `n` distinct samples uniformly at random.
    ///
    /// Returns an empty batch while the memory holds fewer than `min_size`
    /// samples; callers treat that as "skip training this call".  The order
    /// of the returned samples is unspecified.
    pub fn sample(&self, n: usize, rng: &mut AgentRng) -> Vec<&Transition> {
        let len = self.samples.len();
        if len < self.min_size {
            return Vec::new();
        }
        let amount = n.min(len);
        index::sample(rng.inner(), len, amount)
            .into_iter()
            .map(|i| &self.samples[i])
            .collect()
    }

    /// `true` once `sample` will return non-empty batches.
    pub fn is_warm(&self) -> bool {
        self.samples.len() >= self.min_size
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }
}

// ── ReplayBank ────────────────────────────────────────────────────────────────

/// One [`ReplayMemory`] and one sampling RNG per agent.
///
/// Lives for a whole training session: episodes append to it, and it is
/// drained by random sampling after each episode.
pub struct ReplayBank {
    memories: PerAgent<ReplayMemory>,
    rngs:     PerAgent<AgentRng>,
}

impl ReplayBank {
    pub fn new(agent_count: usize, min_size: usize, max_size: usize, seed: u64) -> MemoryResult<Self> {
        let memory = ReplayMemory::new(min_size, max_size)?;
        Ok(Self {
            memories: PerAgent::filled(agent_count, memory),
            rngs:     PerAgent::from_fn(agent_count, |a| AgentRng::new(seed, a, RngStream::Replay)),
        })
    }

    /// Append `sample` to `agent`'s memory.
    pub fn add(&mut self, sample: Transition, agent: AgentId) -> MemoryResult<()> {
        self.memories
            .get_mut(agent)
            .ok_or(MemoryError::UnknownAgent(agent))?
            .add(sample);
        Ok(())
    }

    /// Draw up to `n` samples from `agent`'s memory (see [`ReplayMemory::sample`]).
    pub fn sample(&mut self, n: usize, agent: AgentId) -> MemoryResult<Vec<&Transition>> {
        let memory = self.memories.get(agent).ok_or(MemoryError::UnknownAgent(agent))?;
        let rng = self.rngs.get_mut(agent).ok_or(MemoryError::UnknownAgent(agent))?;
        Ok(memory.sample(n, rng))
    }

    pub fn memory(&self, agent: AgentId) -> Option<&ReplayMemory> {
        self.memories.get(agent)
    }

    pub fn agent_count(&self) -> usize {
        self.memories.len()
    }

    /// Sample count per agent, in agent order.
    pub fn sizes(&self) -> Vec<usize> {
        self.memories.values().map(ReplayMemory::len).collect()
    }
}
