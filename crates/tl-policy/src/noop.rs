//! A model that knows nothing and learns nothing.

use tl_core::{AgentId, State, TlResult};

use crate::ValueModel;

/// A [`ValueModel`] predicting `0.0` for every action.
///
/// Useful for the non-learning baselines, which never consult a model, and
/// as a placeholder in tests.
#[derive(Copy, Clone, Debug)]
pub struct ZeroModel {
    pub num_actions: usize,
}

impl ValueModel for ZeroModel {
    fn predict_one(&self, _agent: AgentId, _state: &State) -> TlResult<Vec<f64>> {
        Ok(vec![0.0; self.num_actions])
    }

    fn train_batch(&mut self, _: AgentId, _: &[&State], _: &[Vec<f64>]) -> TlResult<()> {
        Ok(())
    }
}
