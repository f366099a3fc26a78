//! The `ValueModel` port: the action-value approximator the loop consumes.

use std::path::Path;

use tl_core::{AgentId, State, TlError, TlResult};

/// Per-agent action-value approximator.
///
/// Every call names the agent, so one implementation can hold one network
/// per agent (the two-junction independent layout) or a single network.
/// Failures are fatal to the running episode and are reported as
/// [`TlError::Model`].
///
/// # Example
///
/// ```rust,ignore
/// struct Lookup(HashMap<(AgentId, State), Vec<f64>>);
///
/// impl ValueModel for Lookup {
///     fn predict_one(&self, agent: AgentId, state: &State) -> TlResult<Vec<f64>> {
///         Ok(self.0.get(&(agent, state.clone())).cloned().unwrap_or_else(|| vec![0.0; 4]))
///     }
///     fn train_batch(&mut self, _: AgentId, _: &[&State], _: &[Vec<f64>]) -> TlResult<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait ValueModel {
    /// Predicted value of every action in `state`.
    fn predict_one(&self, agent: AgentId, state: &State) -> TlResult<Vec<f64>>;

    /// Predictions for many states at once.
    ///
    /// Default: one [`predict_one`][Self::predict_one] call per state.
    fn predict_batch(&self, agent: AgentId, states: &[&State]) -> TlResult<Vec<Vec<f64>>> {
        states.iter().map(|s| self.predict_one(agent, s)).collect()
    }

    /// Fit `states[i] → targets[i]` for one pass.
    fn train_batch(
        &mut self,
        agent:   AgentId,
        states:  &[&State],
        targets: &[Vec<f64>],
    ) -> TlResult<()>;

    /// Persist the model under `dir`.
    ///
    /// Default: nothing is written.
    fn save(&self, _dir: &Path) -> TlResult<()> {
        Ok(())
    }
}

/// Models that can be restored from a directory written by
/// [`ValueModel::save`].
pub trait LoadModel: ValueModel + Sized {
    /// Load from `dir`.  A missing model must be reported as
    /// [`TlError::ModelNotFound`].
    fn load(dir: &Path) -> TlResult<Self>;
}

/// Index of the largest value; the first one wins ties.
///
/// Fails on an empty vector or one containing NaN.
pub fn argmax(values: &[f64]) -> TlResult<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            return Err(TlError::Model(format!("prediction {i} is NaN")));
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
        .ok_or_else(|| TlError::Model("empty prediction".into()))
}
