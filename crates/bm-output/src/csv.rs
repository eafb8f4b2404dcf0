//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `collision_events.csv`
//! - `run_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CollisionRow, OutputResult, RunSummaryRow};

pub const COLLISION_HEADER: [&str; 11] = [
    "event_index", "time", "wall", "body_id", "partner_id",
    "mass", "radius", "x", "y", "vx", "vy",
];

pub const SUMMARY_HEADER: [&str; 3] = ["time", "events_resolved", "events_logged"];

/// Writes simulation output to two CSV files.
///
/// Empty cells stand for "not applicable": `wall` on particle rows,
/// `partner_id` on wall rows.
pub struct CsvWriter {
    collisions: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut collisions = Writer::from_path(dir.join("collision_events.csv"))?;
        collisions.write_record(COLLISION_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("run_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            collisions,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_collisions(&mut self, rows: &[CollisionRow]) -> OutputResult<()> {
        for row in rows {
            self.collisions.write_record(&[
                row.event_index.to_string(),
                row.time.to_string(),
                row.wall.map(|w| w.as_str()).unwrap_or_default().to_owned(),
                row.body_id.to_string(),
                row.partner_id.map(|p| p.to_string()).unwrap_or_default(),
                row.mass.to_string(),
                row.radius.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.vx.to_string(),
                row.vy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.time.to_string(),
            row.events_resolved.to_string(),
            row.events_logged.to_string(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.collisions.flush()?;
        self.summaries.flush()?;
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
