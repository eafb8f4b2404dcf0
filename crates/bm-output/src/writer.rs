//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CollisionRow, OutputResult, RunSummaryRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`DiffLogObserver::take_error`][crate::DiffLogObserver::take_error].
pub trait OutputWriter {
    /// Write the rows of one or more events.
    fn write_collisions(&mut self, rows: &[CollisionRow]) -> OutputResult<()>;

    /// Write one run summary row.
    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Push buffered rows to the underlying files.  Writing may continue.
    fn flush(&mut self) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
