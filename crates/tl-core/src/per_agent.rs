//! `PerAgent<T>` — dense per-agent storage indexed by [`AgentId`].
//!
//! Every per-agent structure in the workspace (replay memories, waiting-time
//! tables, phase controllers, statistics) lives in one of these instead of a
//! pair of name-duplicated fields.

use std::ops::{Index, IndexMut};

use crate::AgentId;

/// One `T` per agent, stored in a `Vec` at `agent.index()`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PerAgent<T> {
    slots: Vec<T>,
}

impl<T> PerAgent<T> {
    /// Build storage for `count` agents, calling `init` once per agent.
    pub fn from_fn(count: usize, mut init: impl FnMut(AgentId) -> T) -> Self {
        Self {
            slots: (0..count).map(|i| init(AgentId::from_index(i))).collect(),
        }
    }

    /// Wrap an existing vector whose element `i` belongs to agent `i + 1`.
    pub fn from_vec(slots: Vec<T>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `Some(&T)` if `agent` is within range.
    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&T> {
        self.slots.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut T> {
        self.slots.get_mut(agent.index())
    }

    /// All agent ids in ascending order.
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.slots.len()).map(AgentId::from_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, v)| (AgentId::from_index(i), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AgentId, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (AgentId::from_index(i), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter()
    }

    /// Transform every slot, keeping agent order.
    pub fn map<U>(&self, mut f: impl FnMut(AgentId, &T) -> U) -> PerAgent<U> {
        PerAgent {
            slots: self.iter().map(|(a, v)| f(a, v)).collect(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}

impl<T: Clone> PerAgent<T> {
    /// `count` copies of `value`.
    pub fn filled(count: usize, value: T) -> Self {
        Self { slots: vec![value; count] }
    }
}

impl<T> Index<AgentId> for PerAgent<T> {
    type Output = T;

    #[inline]
    fn index(&self, agent: AgentId) -> &T {
        &self.slots[agent.index()]
    }
}

impl<T> IndexMut<AgentId> for PerAgent<T> {
    #[inline]
    fn index_mut(&mut self, agent: AgentId) -> &mut T {
        &mut self.slots[agent.index()]
    }
}
