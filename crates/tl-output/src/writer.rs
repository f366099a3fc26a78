//! The `OutputWriter` trait implemented by backend writers.

use crate::{DecisionRow, EpisodeRow, OutputResult, StepRow};

/// Sink for control-loop rows.
///
/// Errors are stored by [`HistoryObserver`][crate::HistoryObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    fn write_episode(&mut self, rows: &[EpisodeRow]) -> OutputResult<()>;

    fn write_decision(&mut self, row: &DecisionRow) -> OutputResult<()>;

    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()>;

    /// Push buffered rows to disk without closing.
    fn flush(&mut self) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
