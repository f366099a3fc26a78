//! `LinearModel` — one linear action-value approximator per agent.
//!
//! `q(s) = W·s + b` over the binary occupancy vector, fitted by plain
//! per-sample SGD on squared error.  Small enough to train in the demo's
//! time budget; swap in a real network behind [`ValueModel`] for anything
//! serious.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tl_core::{AgentId, PerAgent, State, TlError, TlResult};
use tl_policy::{LoadModel, ValueModel};

const DEFAULT_LEARNING_RATE: f64 = 0.001;

/// Weights of one agent, persisted as `model_<agent>.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Linear {
    /// `weights[action][cell]`.
    weights: Vec<Vec<f64>>,
    bias:    Vec<f64>,
}

impl Linear {
    fn zeros(num_states: usize, num_actions: usize) -> Self {
        Self {
            weights: vec![vec![0.0; num_states]; num_actions],
            bias:    vec![0.0; num_actions],
        }
    }

    fn predict(&self, state: &State) -> TlResult<Vec<f64>> {
        let width = self.weights.first().map_or(0, Vec::len);
        if state.len() != width {
            return Err(TlError::Model(format!(
                "state length {} does not match model input {width}",
                state.len()
            )));
        }
        Ok(self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| b + state.occupied().map(|c| row[c]).sum::<f64>())
            .collect())
    }

    fn fit(&mut self, state: &State, target: &[f64], lr: f64) -> TlResult<()> {
        let q = self.predict(state)?;
        if target.len() != q.len() {
            return Err(TlError::Model(format!(
                "target has {} values, model has {} actions",
                target.len(),
                q.len()
            )));
        }
        for (a, (&t, &p)) in target.iter().zip(&q).enumerate() {
            let grad = lr * (t - p);
            self.bias[a] += grad;
            for c in state.occupied() {
                self.weights[a][c] += grad;
            }
        }
        Ok(())
    }
}

pub struct LinearModel {
    agents:        PerAgent<Linear>,
    learning_rate: f64,
}

impl LinearModel {
    pub fn new(agent_count: usize, num_states: usize, num_actions: usize) -> Self {
        Self {
            agents:        PerAgent::filled(agent_count, Linear::zeros(num_states, num_actions)),
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }

    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    fn agent(&self, agent: AgentId) -> TlResult<&Linear> {
        self.agents.get(agent).ok_or(TlError::UnknownAgent(agent))
    }
}

fn model_file(dir: &Path, agent: AgentId) -> std::path::PathBuf {
    dir.join(format!("model_{}.json", agent.0))
}

impl ValueModel for LinearModel {
    fn predict_one(&self, agent: AgentId, state: &State) -> TlResult<Vec<f64>> {
        self.agent(agent)?.predict(state)
    }

    fn train_batch(
        &mut self,
        agent:   AgentId,
        states:  &[&State],
        targets: &[Vec<f64>],
    ) -> TlResult<()> {
        let lr = self.learning_rate;
        let linear = self.agents.get_mut(agent).ok_or(TlError::UnknownAgent(agent))?;
        for (state, target) in states.iter().zip(targets) {
            linear.fit(state, target, lr)?;
        }
        Ok(())
    }

    fn save(&self, dir: &Path) -> TlResult<()> {
        std::fs::create_dir_all(dir)?;
        for (agent, linear) in self.agents.iter() {
            let json = serde_json::to_string(linear)
                .map_err(|e| TlError::Model(format!("serialising {agent}: {e}")))?;
            std::fs::write(model_file(dir, agent), json)?;
        }
        Ok(())
    }
}

impl LoadModel for LinearModel {
    /// Reads `model_1.json`, `model_2.json`, … until the first missing file.
    fn load(dir: &Path) -> TlResult<Self> {
        let mut slots = Vec::new();
        loop {
            let path = model_file(dir, AgentId::from_index(slots.len()));
            if !path.is_file() {
                break;
            }
            let json = std::fs::read_to_string(&path)?;
            let linear: Linear = serde_json::from_str(&json)
                .map_err(|e| TlError::Model(format!("{}: {e}", path.display())))?;
            slots.push(linear);
        }
        if slots.is_empty() {
            return Err(TlError::ModelNotFound(dir.to_path_buf()));
        }
        Ok(Self {
            agents:        PerAgent::from_vec(slots),
            learning_rate: DEFAULT_LEARNING_RATE,
        })
    }
}
