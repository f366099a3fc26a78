//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `episodes.csv`
//! - `decisions.csv`
//! - `steps.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DecisionRow, EpisodeRow, OutputResult, StepRow};

/// Writes control-loop output to three CSV files.
pub struct CsvHistoryWriter {
    episodes:  Writer<File>,
    decisions: Writer<File>,
    steps:     Writer<File>,
    finished:  bool,
}

impl CsvHistoryWriter {
    /// Create `dir` if needed, open the three CSV files and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut episodes = Writer::from_path(dir.join("episodes.csv"))?;
        episodes.write_record(["episode", "agent", "neg_reward", "cumulative_wait", "avg_queue"])?;

        let mut decisions = Writer::from_path(dir.join("decisions.csv"))?;
        decisions.write_record(["episode", "step", "agent", "action", "reward", "occupied"])?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(["episode", "step", "agent", "queue"])?;

        Ok(Self {
            episodes,
            decisions,
            steps,
            finished: false,
        })
    }
}

impl OutputWriter for CsvHistoryWriter {
    fn write_episode(&mut self, rows: &[EpisodeRow]) -> OutputResult<()> {
        for row in rows {
            self.episodes.write_record(&[
                row.episode.to_string(),
                row.agent.clone(),
                row.neg_reward.to_string(),
                row.cumulative_wait.to_string(),
                row.avg_queue.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_decision(&mut self, row: &DecisionRow) -> OutputResult<()> {
        self.decisions.write_record(&[
            row.episode.to_string(),
            row.step.to_string(),
            row.agent.to_string(),
            row.action.to_string(),
            row.reward.to_string(),
            row.occupied.to_string(),
        ])?;
        Ok(())
    }

    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        for row in rows {
            self.steps.write_record(&[
                row.episode.to_string(),
                row.step.to_string(),
                row.agent.to_string(),
                row.queue.to_string(),
            ])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.episodes.flush()?;
        self.decisions.flush()?;
        self.steps.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush()
    }
}
