//! `DiffLogObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use bm_sim::{SimDiff, SimObserver};

use crate::row::{CollisionRow, RunSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that logs every resolved event to any
/// [`OutputWriter`] backend.
///
/// Works both as an engine observer and as a plain sink for diffs read off a
/// driver's stream: call [`on_event`][SimObserver::on_event] for each diff.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After a run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct DiffLogObserver<W: OutputWriter> {
    writer:        W,
    events_logged: u64,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> DiffLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            events_logged: 0,
            last_error:    None,
        }
    }

    /// Events written so far.
    pub fn events_logged(&self) -> u64 {
        self.events_logged
    }

    /// Take the stored write error (if any) after a run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush and close the writer, reporting the first error seen.
    pub fn finish(&mut self) -> OutputResult<()> {
        let result = self.writer.finish();
        self.store_err(result);
        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
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

impl<W: OutputWriter> SimObserver for DiffLogObserver<W> {
    fn on_event(&mut self, diff: &SimDiff) {
        let rows = CollisionRow::from_diff(self.events_logged, diff);
        self.events_logged += 1;
        if !rows.is_empty() {
            let result = self.writer.write_collisions(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, time: f64, events_resolved: u64) {
        let row = RunSummaryRow {
            time,
            events_resolved,
            events_logged: self.events_logged,
        };
        let result = self.writer.write_run_summary(&row);
        self.store_err(result);
        let result = self.writer.flush();
        self.store_err(result);
    }
}
