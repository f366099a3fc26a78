//! corridor — the traffic-signal control loop on a two-junction toy corridor.
//!
//! ```text
//! corridor train  [config.json]   learn for total_episodes, save the model
//! corridor test   [config.json]   one greedy episode with the saved model
//! corridor random [config.json]   random-action reference run
//! corridor cyclic [config.json]   fixed round-robin reference run
//! ```
//!
//! Logging goes through `tracing`; set `RUST_LOG` to override the default
//! `corridor=info,tl_sim=info` filter.

mod model;
mod routes;
mod toy_sim;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tl_core::{Action, AgentId, ControlConfig, ControlMode, PerAgent, State};
use tl_output::{CsvHistoryWriter, HistoryObserver, export_history};
use tl_policy::{EpsilonSchedule, LoadModel, ValueModel};
use tl_sim::{EpisodeObserver, EpisodeSummary, OrchestratorBuilder, TraceRecorder};

use model::LinearModel;
use routes::SeededRoutes;
use toy_sim::CorridorSim;

const DEFAULT_CONFIG: &str = "corridor.json";

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
struct DemoConfig {
    #[serde(flatten)]
    control:              ControlConfig,
    total_episodes:       u32,
    vehicles_per_episode: usize,
    output_dir:           PathBuf,
    model_dir:            PathBuf,
}

fn load_config(path: &Path) -> Result<DemoConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: DemoConfig = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Forwards every callback to two observers.
struct Tee<A, B> {
    first:  A,
    second: B,
}

impl<A: EpisodeObserver, B: EpisodeObserver> EpisodeObserver for Tee<A, B> {
    fn on_episode_start(&mut self, episode: u32, epsilon: f64) {
        self.first.on_episode_start(episode, epsilon);
        self.second.on_episode_start(episode, epsilon);
    }

    fn on_decision(&mut self, step: u64, agent: AgentId, state: &State, action: Action, reward: f64) {
        self.first.on_decision(step, agent, state, action, reward);
        self.second.on_decision(step, agent, state, action, reward);
    }

    fn on_step(&mut self, step: u64, queues: &PerAgent<f64>) {
        self.first.on_step(step, queues);
        self.second.on_step(step, queues);
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) {
        self.first.on_episode_end(summary);
        self.second.on_episode_end(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("corridor=info,tl_sim=info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("installing the tracing subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "train".to_owned());
    let config_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let mut config = load_config(&config_path)?;

    config.control.mode = match command.as_str() {
        "train" => ControlMode::Training,
        "test" => ControlMode::Evaluation,
        "random" => ControlMode::RandomBaseline,
        "cyclic" => ControlMode::CyclicBaseline,
        other => bail!("unknown command {other:?}; expected train, test, random or cyclic"),
    };
    info!(config = %config_path.display(), mode = ?config.control.mode, "corridor");

    match config.control.mode {
        ControlMode::Evaluation => evaluate(&config),
        _ => session(&config),
    }
}

fn route_source(config: &DemoConfig) -> SeededRoutes {
    let layout = config.control.make_layout();
    SeededRoutes {
        dir:       config.output_dir.join("routes"),
        roads:     layout.all_roads().into_iter().map(str::to_owned).collect(),
        vehicles:  config.vehicles_per_episode,
        max_steps: config.control.max_steps,
    }
}

/// Training or a reference baseline over `total_episodes` episodes.
fn session(config: &DemoConfig) -> Result<()> {
    let control = &config.control;
    let agents = control.make_layout().agent_count();
    let model = LinearModel::new(agents, control.num_states, control.num_actions);

    let mut orch = OrchestratorBuilder::new(control.clone(), CorridorSim::new(), route_source(config), model)
        .build()?;

    let run_dir = config.output_dir.join(format!("{:?}", control.mode).to_lowercase());
    let writer = CsvHistoryWriter::new(&run_dir)?;
    let mut obs = HistoryObserver::new(writer).record_steps(false);

    let schedule = EpsilonSchedule::Linear { total_episodes: config.total_episodes };
    let t0 = Instant::now();
    orch.run_training_session(schedule, config.total_episodes, &mut obs)?;
    obs.finish();
    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output error");
    }

    if control.mode.is_learning() {
        orch.model().save(&config.model_dir)?;
        info!(dir = %config.model_dir.display(), "model saved");
    }
    export_history(&run_dir.join("history.csv"), orch.history())?;

    println!("Session complete in {:.1} s", t0.elapsed().as_secs_f64());
    print_history(orch.history().episodes(), |i| {
        let h = &orch.history().total;
        (h.reward[i], h.cumulative_wait[i], h.avg_queue[i])
    });
    Ok(())
}

/// One greedy episode on the fixed evaluation seed.
fn evaluate(config: &DemoConfig) -> Result<()> {
    let model = LinearModel::load(&config.model_dir)
        .with_context(|| format!("model not found in {}", config.model_dir.display()))?;
    let agents = config.control.make_layout().agent_count();
    if model.agent_count() != agents {
        bail!("model has {} agent(s), layout needs {agents}", model.agent_count());
    }

    let mut orch = OrchestratorBuilder::new(config.control.clone(), CorridorSim::new(), route_source(config), model)
        .build()?;

    let run_dir = config.output_dir.join("test");
    let mut obs = Tee {
        first:  TraceRecorder::new(agents),
        second: HistoryObserver::new(CsvHistoryWriter::new(&run_dir)?),
    };
    let report = orch.run_episode(0, 0.0, &mut obs)?;
    obs.second.finish();
    if let Some(e) = obs.second.take_error() {
        warn!(error = %e, "output error");
    }

    let trace = &obs.first;
    println!("Evaluation episode in {:.1} s", report.simulation_time.as_secs_f64());
    println!("{:<10} {:>12} {:>14} {:>10} {:>10}", "Agent", "Neg reward", "Waiting (s)", "Avg queue", "Decisions");
    println!("{}", "-".repeat(60));
    for (agent, s) in report.summary.agents.iter() {
        println!(
            "{:<10} {:>12.1} {:>14.1} {:>10.2} {:>10}",
            agent.0,
            s.neg_reward,
            s.waiting_time,
            s.avg_queue,
            trace.actions[agent].len(),
        );
    }
    let peak = trace.total_queue.iter().copied().fold(0.0_f64, f64::max);
    println!("Peak halted vehicles: {peak:.0}");
    Ok(())
}

fn print_history(episodes: usize, row: impl Fn(usize) -> (f64, f64, f64)) {
    println!("{:<8} {:>12} {:>14} {:>10}", "Episode", "Neg reward", "Waiting (s)", "Avg queue");
    println!("{}", "-".repeat(48));
    for i in 0..episodes {
        let (reward, wait, queue) = row(i);
        println!("{i:<8} {reward:>12.1} {wait:>14.1} {queue:>10.2}");
    }
}

#[cfg(test)]
mod tests;
