//! `bm-output` — event log writers for the hard-disc gas engine.
//!
//! | Backend | Files created                                  |
//! |---------|------------------------------------------------|
//! | CSV     | `collision_events.csv`, `run_summaries.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`DiffLogObserver`], which implements `bm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bm_output::{CsvWriter, DiffLogObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = DiffLogObserver::new(writer);
//! engine.run_events(10_000, &mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DiffLogObserver;
pub use row::{CollisionRow, RunSummaryRow};
pub use writer::OutputWriter;
