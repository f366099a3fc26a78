//! `HistoryObserver<W>` — bridges `EpisodeObserver` to an `OutputWriter`.

use tl_core::{Action, AgentId, PerAgent, State};
use tl_sim::{EpisodeObserver, EpisodeSummary};

use crate::row::{DecisionRow, EpisodeRow, StepRow, TOTAL};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`EpisodeObserver`] that writes episode summaries, decisions and
/// (optionally) per-step queues to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run returns, call
/// [`finish`][Self::finish] and check [`take_error`][Self::take_error].
pub struct HistoryObserver<W: OutputWriter> {
    writer:       W,
    episode:      u32,
    record_steps: bool,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> HistoryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            episode:      0,
            record_steps: true,
            last_error:   None,
        }
    }

    /// Whether to write one row per agent per simulation step (default on).
    /// Long training sessions usually turn this off.
    pub fn record_steps(mut self, on: bool) -> Self {
        self.record_steps = on;
        self
    }

    /// Flush and close the writer.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> EpisodeObserver for HistoryObserver<W> {
    fn on_episode_start(&mut self, episode: u32, _epsilon: f64) {
        self.episode = episode;
    }

    fn on_decision(&mut self, step: u64, agent: AgentId, state: &State, action: Action, reward: f64) {
        let row = DecisionRow {
            episode:  self.episode,
            step,
            agent:    agent.0,
            action:   action.0,
            reward,
            occupied: state.occupied_count(),
        };
        let result = self.writer.write_decision(&row);
        self.store_err(result);
    }

    fn on_step(&mut self, step: u64, queues: &PerAgent<f64>) {
        if !self.record_steps {
            return;
        }
        let rows: Vec<StepRow> = queues
            .iter()
            .map(|(agent, &queue)| StepRow {
                episode: self.episode,
                step,
                agent:   agent.0,
                queue,
            })
            .collect();
        let result = self.writer.write_steps(&rows);
        self.store_err(result);
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) {
        let mut rows: Vec<EpisodeRow> = summary
            .agents
            .iter()
            .map(|(agent, s)| EpisodeRow {
                episode:         summary.episode,
                agent:           agent.0.to_string(),
                neg_reward:      s.neg_reward,
                cumulative_wait: s.waiting_time,
                avg_queue:       s.avg_queue,
            })
            .collect();
        rows.push(EpisodeRow {
            episode:         summary.episode,
            agent:           TOTAL.to_owned(),
            neg_reward:      summary.total.neg_reward,
            cumulative_wait: summary.total.waiting_time,
            avg_queue:       summary.total.avg_queue,
        });

        let result = self.writer.write_episode(&rows);
        self.store_err(result);
        let result = self.writer.flush();
        self.store_err(result);
    }
}
