//! Simulation observer trait for progress reporting and data collection.

use crate::SimDiff;

/// Callbacks invoked by [`Engine::run_events`][crate::Engine::run_events]
/// and [`Engine::advance_until`][crate::Engine::advance_until].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64, seen: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_event(&mut self, diff: &SimDiff) {
///         self.seen += 1;
///         if self.seen % self.interval == 0 {
///             println!("t = {:.2}: {} events", diff.time, self.seen);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every resolved event with the bodies it changed.
    fn on_event(&mut self, _diff: &SimDiff) {}

    /// Called once when a bounded run returns normally.
    ///
    /// `time` is the engine clock and `events_resolved` the engine's running
    /// total, not just this run's share.
    fn on_run_end(&mut self, _time: f64, _events_resolved: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call a run
/// helper but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
