//! `tl-output` — CSV output for the traffic-signal control loop.
//!
//! | File            | One row per                       | Written by             |
//! |-----------------|-----------------------------------|------------------------|
//! | `episodes.csv`  | episode × (agent, total)          | [`HistoryObserver`]    |
//! | `decisions.csv` | agent decision                    | [`HistoryObserver`]    |
//! | `steps.csv`     | simulation step × agent           | [`HistoryObserver`]    |
//! | any path        | episode, all series as columns    | [`export_history`]     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use tl_output::{CsvHistoryWriter, HistoryObserver};
//!
//! let writer = CsvHistoryWriter::new(Path::new("./output"))?;
//! let mut obs = HistoryObserver::new(writer).record_steps(false);
//! orch.run_training_session(schedule, episodes, &mut obs)?;
//! obs.finish();
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod history;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvHistoryWriter;
pub use error::{OutputError, OutputResult};
pub use history::export_history;
pub use observer::HistoryObserver;
pub use row::{DecisionRow, EpisodeRow, StepRow};
pub use writer::OutputWriter;
