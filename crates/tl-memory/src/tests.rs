//! Unit tests for tl-memory.

use std::collections::HashSet;

use tl_core::{Action, AgentId, AgentRng, RngStream, State, Transition};

use crate::{ReplayBank, ReplayMemory};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A transition tagged by its reward so tests can tell samples apart.
fn tagged(tag: u32) -> Transition {
    Transition::new(State::empty(4), Action(0), tag as f64, State::empty(4))
}

fn rng() -> AgentRng {
    AgentRng::new(99, AgentId::FIRST, RngStream::Replay)
}

fn tags<'a>(samples: impl IntoIterator<Item = &'a Transition>) -> Vec<u32> {
    samples.into_iter().map(|t| t.reward as u32).collect()
}

fn sorted_tags<'a>(samples: impl IntoIterator<Item = &'a Transition>) -> Vec<u32> {
    let mut t = tags(samples);
    t.sort_unstable();
    t
}

// ── ReplayMemory ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert!(ReplayMemory::new(10, 5).is_err());
        assert!(ReplayMemory::new(0, 0).is_err());
    }

    #[test]
    fn never_exceeds_max_size() {
        let mut m = ReplayMemory::new(0, 5).unwrap();
        for i in 0..23 {
            m.add(tagged(i));
            assert!(m.len() <= 5);
        }
        assert_eq!(m.len(), 5);
    }

    #[test]
    fn oldest_evicted_first() {
        let mut m = ReplayMemory::new(0, 3).unwrap();
        for i in 0..3 {
            m.add(tagged(i));
        }
        m.add(tagged(3));
        assert_eq!(sorted_tags(m.sample(10, &mut rng())), vec![1, 2, 3]);
        m.add(tagged(4));
        assert_eq!(sorted_tags(m.sample(10, &mut rng())), vec![2, 3, 4]);
    }

    #[test]
    fn sample_empty_below_min_size() {
        let mut m = ReplayMemory::new(4, 10).unwrap();
        for i in 0..3 {
            m.add(tagged(i));
        }
        assert!(!m.is_warm());
        assert!(m.sample(2, &mut rng()).is_empty());
        m.add(tagged(3));
        assert!(m.is_warm());
    }

    #[test]
    fn sample_returns_min_of_n_and_len() {
        let mut m = ReplayMemory::new(2, 10).unwrap();
        for i in 0..6 {
            m.add(tagged(i));
        }
        assert_eq!(m.sample(4, &mut rng()).len(), 4);
        assert_eq!(m.sample(100, &mut rng()).len(), 6);
    }

    #[test]
    fn sample_without_replacement() {
        let mut m = ReplayMemory::new(0, 50).unwrap();
        for i in 0..50 {
            m.add(tagged(i));
        }
        let mut r = rng();
        for _ in 0..20 {
            let batch = tags(m.sample(30, &mut r));
            let unique: HashSet<_> = batch.iter().collect();
            assert_eq!(unique.len(), batch.len());
        }
    }

    #[test]
    fn sample_is_deterministic_for_a_seed() {
        let mut m = ReplayMemory::new(0, 100).unwrap();
        for i in 0..100 {
            m.add(tagged(i));
        }
        let a = tags(m.sample(10, &mut rng()));
        let b = tags(m.sample(10, &mut rng()));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_min_size_empty_memory_samples_nothing() {
        let m = ReplayMemory::new(0, 10).unwrap();
        assert!(m.sample(5, &mut rng()).is_empty());
    }
}

// ── ReplayBank ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bank {
    use super::*;

    #[test]
    fn agents_are_isolated() {
        let mut bank = ReplayBank::new(2, 0, 10, 1).unwrap();
        bank.add(tagged(1), AgentId::FIRST).unwrap();
        bank.add(tagged(2), AgentId::SECOND).unwrap();
        bank.add(tagged(3), AgentId::SECOND).unwrap();
        assert_eq!(bank.sizes(), vec![1, 2]);

        let second = tags(bank.sample(10, AgentId::SECOND).unwrap());
        let mut sorted = second.clone();
        sorted.sort();
        assert_eq!(sorted, vec![2, 3]);
    }

    #[test]
    fn unknown_agent_is_an_error() {
        let mut bank = ReplayBank::new(1, 0, 10, 1).unwrap();
        assert!(bank.add(tagged(0), AgentId::SECOND).is_err());
        assert!(bank.sample(1, AgentId::SECOND).is_err());
    }

    #[test]
    fn cold_bank_yields_empty_batches() {
        let mut bank = ReplayBank::new(2, 3, 10, 1).unwrap();
        bank.add(tagged(0), AgentId::FIRST).unwrap();
        assert!(bank.sample(5, AgentId::FIRST).unwrap().is_empty());
    }
}
