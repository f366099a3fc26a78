//! The `Orchestrator` and its episode loop.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use tl_core::{
    Action, AgentId, AgentRng, ControlConfig, ControlMode, Layout, PerAgent, Transition,
    VehicleObservation,
};
use tl_encode::StateEncoder;
use tl_memory::{ReplayBank, ReplayMemory};
use tl_policy::{ActionPolicy, EpsilonSchedule, ValueModel};
use tl_reward::RewardPolicy;
use tl_signal::PhaseCommand;

use crate::episode::EpisodeRun;
use crate::replay::train_agent;
use crate::{
    EpisodeHistory, EpisodeObserver, EpisodeSummary, RouteSource, SimError, SimResult, TrafficSim,
    observe,
};

/// Wall-clock cost and figures of one finished episode.
#[derive(Clone, Debug)]
pub struct EpisodeReport {
    pub summary:         EpisodeSummary,
    pub simulation_time: Duration,
    /// Zero unless the run is learning.
    pub training_time:   Duration,
}

/// Drives episodes of the control loop against a simulation and a model.
///
/// Owns the parts that outlive an episode: configuration, layout, state
/// encoders, per-agent RNGs, replay memory (one per agent, kept for the
/// whole session) and the reported history.  Everything that must start
/// fresh each episode lives in an internal episode state rebuilt by
/// [`run_episode`][Self::run_episode].
///
/// Create via [`OrchestratorBuilder`][crate::OrchestratorBuilder].
pub struct Orchestrator<S: TrafficSim, R: RouteSource, M: ValueModel> {
    pub(crate) config:        ControlConfig,
    pub(crate) layout:        Layout,
    pub(crate) encoders:      PerAgent<StateEncoder>,
    pub(crate) reward_policy: RewardPolicy,
    pub(crate) memory:        ReplayBank,
    pub(crate) policy_rngs:   PerAgent<AgentRng>,
    pub(crate) sim:           S,
    pub(crate) routes:        R,
    pub(crate) model:         M,
    pub(crate) history:       EpisodeHistory,
}

impl<S: TrafficSim, R: RouteSource, M: ValueModel> Orchestrator<S, R, M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run `total_episodes` training episodes with epsilon taken from
    /// `schedule`.
    pub fn run_training_session<O: EpisodeObserver>(
        &mut self,
        schedule:       EpsilonSchedule,
        total_episodes: u32,
        observer:       &mut O,
    ) -> SimResult<()> {
        let started = Instant::now();
        for episode in 0..total_episodes {
            let epsilon = schedule.epsilon(episode);
            let report = self.run_episode(episode, epsilon, observer)?;
            info!(
                episode,
                simulation_s = report.simulation_time.as_secs_f64(),
                training_s = report.training_time.as_secs_f64(),
                total_s = (report.simulation_time + report.training_time).as_secs_f64(),
                "episode finished"
            );
        }
        info!(total_episodes, elapsed_s = started.elapsed().as_secs_f64(), "session finished");
        Ok(())
    }

    /// Run one episode from simulation reset to `max_steps`, then (when the
    /// mode learns) `training_epochs` replay passes.
    ///
    /// The route schedule is seeded with `episode`, or with
    /// `test_episode_seed` in evaluation mode.
    pub fn run_episode<O: EpisodeObserver>(
        &mut self,
        episode:  u32,
        epsilon:  f64,
        observer: &mut O,
    ) -> SimResult<EpisodeReport> {
        let seed = match self.config.mode {
            ControlMode::Evaluation => self.config.test_episode_seed,
            _ => u64::from(episode),
        };
        let route_file = self.routes.generate(seed)?;
        self.sim.reset(&route_file)?;
        info!(episode, epsilon, seed, mode = ?self.config.mode, "simulating");
        observer.on_episode_start(episode, epsilon);

        let started = Instant::now();
        let policy = ActionPolicy::for_mode(
            self.config.mode,
            epsilon,
            self.config.fixed_phase_duration,
        );
        let mut run = EpisodeRun::new(&self.layout, &self.config, self.reward_policy)?;

        // The simulation is closed even when a tick fails; the tick error wins.
        let ticks = self.run_ticks(&mut run, policy, observer);
        let closed = self.sim.close();
        if let Err(e) = ticks {
            if let Err(close_err) = closed {
                warn!(episode, error = %close_err, "closing the simulation after a failed episode");
            }
            return Err(e);
        }
        closed?;
        let simulation_time = started.elapsed();

        let summary = run.stats.finish(episode);
        self.history.push(&summary);
        observer.on_episode_end(&summary);
        info!(
            episode,
            neg_reward = summary.total.neg_reward,
            waiting_time = summary.total.waiting_time,
            avg_queue = summary.total.avg_queue,
            "episode summary"
        );

        let started = Instant::now();
        if self.config.mode.is_learning() {
            self.train()?;
        }
        let training_time = if self.config.mode.is_learning() {
            started.elapsed()
        } else {
            Duration::ZERO
        };

        Ok(EpisodeReport { summary, simulation_time, training_time })
    }

    /// Run `training_epochs` replay passes, each drawing one batch per
    /// agent.  Returns the number of samples trained on, per agent.
    pub fn train(&mut self) -> SimResult<PerAgent<usize>> {
        let agent_count = self.layout.agent_count();
        let mut trained = PerAgent::filled(agent_count, 0usize);

        info!(sizes = ?self.memory.sizes(), epochs = self.config.training_epochs, "training");
        // Memories do not grow while training, so warmth is fixed for the call.
        let mut warm = Vec::with_capacity(agent_count);
        for agent in trained.agents() {
            if self.memory.memory(agent).is_some_and(ReplayMemory::is_warm) {
                warm.push(agent);
            } else {
                warn!(%agent, epochs = self.config.training_epochs, "replay memory not warm, training skipped");
            }
        }

        for _ in 0..self.config.training_epochs {
            for &agent in &warm {
                let n = train_agent(
                    &mut self.memory,
                    &mut self.model,
                    agent,
                    self.config.batch_size,
                    self.config.gamma,
                )?;
                trained[agent] += n;
            }
        }
        Ok(trained)
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Per-episode histories of every episode run so far.
    pub fn history(&self) -> &EpisodeHistory {
        &self.history
    }

    pub fn memory(&self) -> &ReplayBank {
        &self.memory
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Give back the simulation, route source and model.
    pub fn into_parts(self) -> (S, R, M) {
        (self.sim, self.routes, self.model)
    }

    // ── Control tick ──────────────────────────────────────────────────────

    fn run_ticks<O: EpisodeObserver>(
        &mut self,
        run:      &mut EpisodeRun,
        policy:   ActionPolicy,
        observer: &mut O,
    ) -> SimResult<()> {
        let mut step = 0u64;
        while step < self.config.max_steps {
            self.decide(run, step, policy, observer)?;
            self.finish_yellows(run)?;
            step = self.advance(run, step, observer)?;
        }
        Ok(())
    }

    /// Decide for every agent whose green has run its course.
    fn decide<O: EpisodeObserver>(
        &mut self,
        run:      &mut EpisodeRun,
        step:     u64,
        policy:   ActionPolicy,
        observer: &mut O,
    ) -> SimResult<()> {
        let due: Vec<AgentId> = run
            .controllers
            .iter()
            .filter(|(_, c)| c.decision_due())
            .map(|(agent, _)| agent)
            .collect();
        if due.is_empty() {
            return Ok(());
        }

        let vehicles = observe(&self.sim)?;
        let waits = self.current_waits(run, &vehicles);
        let rewards = run.rewards.compute(&waits, &run.junction_actions)?;

        for agent in due {
            let state = self.encoders[agent].encode(&vehicles);
            let reward = rewards[agent];

            if let Some((old_state, old_action)) = run.previous[agent].take() {
                if self.config.mode.is_learning() {
                    let sample = Transition::new(old_state, old_action, reward, state.clone());
                    self.memory.add(sample, agent)?;
                }
            }
            run.stats.record_reward(agent, reward);

            let action = policy.choose(
                agent,
                &state,
                step,
                self.config.num_actions,
                &self.model,
                &mut self.policy_rngs[agent],
            )?;
            observer.on_decision(step, agent, &state, action, reward);
            debug!(step, %agent, %action, reward, occupied = state.occupied_count(), "decision");

            let controller = &mut run.controllers[agent];
            let (junction, local) = controller.space().resolve(action)?;
            if let Some(command) = controller.commit_decision(action)? {
                self.apply(command)?;
            }
            if let Some(slot) = run.junction_actions.get_mut(junction.index()) {
                *slot = Some(Action(u16::from(local)));
            }
            run.previous[agent] = Some((state, action));
        }
        Ok(())
    }

    fn current_waits(&self, run: &mut EpisodeRun, vehicles: &[VehicleObservation]) -> PerAgent<f64> {
        let mut waits = PerAgent::filled(run.tables.len(), 0.0);
        for (agent, table) in run.tables.iter_mut() {
            waits[agent] = table.update(self.layout.agent(agent), vehicles);
        }
        waits
    }

    /// Commit every green whose yellow has run its course.
    fn finish_yellows(&mut self, run: &mut EpisodeRun) -> SimResult<()> {
        let mut commands = Vec::new();
        for (_, controller) in run.controllers.iter_mut() {
            if let Some(command) = controller.poll_yellow()? {
                commands.push(command);
            }
        }
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    /// Step the simulation up to `step_size` steps, one at a time, and
    /// charge elapsed time to every controller.  Returns the new step.
    fn advance<O: EpisodeObserver>(
        &mut self,
        run:      &mut EpisodeRun,
        mut step: u64,
        observer: &mut O,
    ) -> SimResult<u64> {
        let remaining = self.config.max_steps.saturating_sub(step);
        let steps = u64::from(self.config.step_size).min(remaining) as u32;

        for _ in 0..steps {
            self.sim.step(1)?;
            step += 1;
            let mut queues = PerAgent::filled(self.layout.agent_count(), 0.0);
            for (agent, layout) in self.layout.agents.iter() {
                let mut halted = 0u32;
                for road in layout.roads() {
                    halted += self.sim.halting_count(road)?;
                }
                queues[agent] = f64::from(halted);
                run.stats.record_queue(agent, f64::from(halted));
            }
            observer.on_step(step, &queues);
        }

        for (_, controller) in run.controllers.iter_mut() {
            controller.advance(steps);
        }
        Ok(step)
    }

    /// Forward a phase command to the simulation.
    fn apply(&mut self, command: PhaseCommand) -> SimResult<()> {
        let name = self
            .layout
            .junction_name(command.junction)
            .ok_or(SimError::UnknownJunction(command.junction))?;
        debug!(junction = name, phase = ?command.phase, code = command.phase.code(), "phase set");
        self.sim.set_phase(name, command.phase.code())?;
        Ok(())
    }
}
