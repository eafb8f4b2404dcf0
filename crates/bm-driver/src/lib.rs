//! `bm-driver` — runs the engine on a background thread.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`driver`]  | `SimDriver` — producer thread, pause/resume/replace, stop |
//! | [`channel`] | `DiffStream` — bounded blocking FIFO of `SimDiff`s        |
//! | [`mirror`]  | `BodyMirror` — consumer-side population rebuilt from diffs |
//! | [`error`]   | `DriverError`, `DriverResult<T>`, `TryRecvError`          |
//!
//! # Threads
//!
//! ```text
//!  simulation thread                      consumer thread(s)
//!  ─────────────────                      ──────────────────
//!  engine.step() ──► DiffStream (2 × N) ──► recv / sync_to  → BodyMirror
//!        ▲                                       │
//!        └──── pause / resume / replace / stop ──┘   (SimDriver methods)
//! ```
//!
//! The stream's capacity (two diffs per body) is the only backpressure: the
//! producer never sleeps, it just blocks in `send` while the stream is full.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bm_core::GasConfig;
//! use bm_driver::{BodyMirror, SimDriver};
//! use bm_sim::NoopObserver;
//!
//! let driver = SimDriver::spawn(GasConfig::default())?;
//! let stream = driver.stream();
//! let mut mirror = BodyMirror::new(driver.initial_bodies());
//! stream.wait_loaded(Duration::from_secs(5));
//! mirror.sync_to(&stream, 100.0, &mut NoopObserver);
//! driver.join()?;
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod mirror;


pub use channel::DiffStream;
pub use driver::SimDriver;
pub use error::{DriverError, DriverResult, TryRecvError};
pub use mirror::BodyMirror;
