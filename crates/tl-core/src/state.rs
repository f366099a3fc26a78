//! Occupancy states and replay transitions.

use crate::Action;

// ── State ─────────────────────────────────────────────────────────────────────

/// Fixed-length binary occupancy vector: one flag per
/// `(lane_group, distance_cell)` pair.
///
/// Built fresh at every decision point and never mutated once handed to a
/// caller; [`State::occupy`] is only used while encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    cells: Vec<bool>,
}

impl State {
    /// All-empty state of length `num_states`.
    pub fn empty(num_states: usize) -> Self {
        Self { cells: vec![false; num_states] }
    }

    /// Mark `cell` as occupied.  Returns `false` (and writes nothing) when
    /// `cell` is outside the vector.
    #[inline]
    pub fn occupy(&mut self, cell: usize) -> bool {
        match self.cells.get_mut(cell) {
            Some(slot) => {
                *slot = true;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_occupied(&self, cell: usize) -> bool {
        self.cells.get(cell).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Indices of every occupied cell, ascending.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

// ── Transition ────────────────────────────────────────────────────────────────

/// One `(state, action, reward, next_state)` sample.
///
/// Created when an agent's decision interval elapses and appended to that
/// agent's replay memory; never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state:      State,
    pub action:     Action,
    pub reward:     f64,
    pub next_state: State,
}

impl Transition {
    pub fn new(state: State, action: Action, reward: f64, next_state: State) -> Self {
        Self { state, action, reward, next_state }
    }
}
