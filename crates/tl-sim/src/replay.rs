//! Replay training: one-step Bellman targets from sampled transitions.
//!
//! ```text
//! for (s, a, r, s') in batch:
//!     q      = model(s)
//!     q[a]   = r + gamma · max(model(s'))
//! train(states, q)
//! ```
//!
//! Each agent trains on its own batch drawn from its own memory; there is no
//! shared step between agents.

use tl_core::{AgentId, State, TlError, Transition};
use tl_memory::ReplayBank;
use tl_policy::ValueModel;

use crate::SimResult;

/// Bellman targets for `batch`, given the model's predictions for every
/// `state` (`q`) and every `next_state` (`q_next`), in batch order.
pub fn bellman_targets(
    batch:  &[&Transition],
    mut q:  Vec<Vec<f64>>,
    q_next: &[Vec<f64>],
    gamma:  f64,
) -> SimResult<Vec<Vec<f64>>> {
    if q.len() != batch.len() || q_next.len() != batch.len() {
        return Err(TlError::Model(format!(
            "predicted {} / {} value vectors for a batch of {}",
            q.len(),
            q_next.len(),
            batch.len()
        ))
        .into());
    }
    for ((t, row), next) in batch.iter().zip(q.iter_mut()).zip(q_next) {
        let best_next = next.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !best_next.is_finite() {
            return Err(TlError::Model("empty or non-finite next-state prediction".into()).into());
        }
        let slot = row.get_mut(t.action.index()).ok_or_else(|| {
            TlError::Model(format!("{} outside predicted value vector", t.action))
        })?;
        *slot = t.reward + gamma * best_next;
    }
    Ok(q)
}

/// Draw one batch for `agent` and submit it to the model.
///
/// Returns the batch size; `0` means the memory was not warm and nothing
/// was trained.
pub fn train_agent<M: ValueModel + ?Sized>(
    memory:     &mut ReplayBank,
    model:      &mut M,
    agent:      AgentId,
    batch_size: usize,
    gamma:      f64,
) -> SimResult<usize> {
    let batch = memory.sample(batch_size, agent)?;
    if batch.is_empty() {
        return Ok(0);
    }

    let states: Vec<&State> = batch.iter().map(|t| &t.state).collect();
    let next_states: Vec<&State> = batch.iter().map(|t| &t.next_state).collect();

    let q = model.predict_batch(agent, &states)?;
    let q_next = model.predict_batch(agent, &next_states)?;
    let targets = bellman_targets(&batch, q, &q_next, gamma)?;

    model.train_batch(agent, &states, &targets)?;
    Ok(batch.len())
}
