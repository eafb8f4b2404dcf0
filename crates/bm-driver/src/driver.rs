//! `SimDriver` — runs an [`Engine`] on its own thread and streams diffs.
//!
//! # Producer loop
//!
//! ```text
//! loop:
//!   lock
//!     Stopping             → exit
//!     Paused | Replacing   → parked = true, wait on the signal
//!     Running              → diff = engine.step(), grab the current stream
//!   unlock
//!   stream.send(diff)      blocks while the stream is full
//!   send failed (closed)   → drop the diff, loop back to honour the mode
//! ```
//!
//! The step itself runs under the lock, so the engine is never observed
//! half-updated.  The send runs outside it, so a consumer-side query never
//! waits on backpressure.
//!
//! # Replacement handshake
//!
//! `pause_and_replace` builds the new engine first, then sets `Replacing`
//! and closes the old stream.  A producer blocked in `send` wakes with an error
//! and parks; one that is mid-step finishes, fails its send, and parks.
//! Once `parked` is observed the engine and stream are swapped and the mode
//! returns to `Running`.  A diff of the old run can never reach the new
//! stream because it was bound to the old stream before the lock was
//! released.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use bm_core::{BodySnapshot, GasConfig};
use bm_sim::{Engine, SimError};

use crate::{DiffStream, DriverError, DriverResult};

// ── Shared state ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Mode {
    Running,
    /// Parked by `pause`; `resume` brings it back.
    Paused,
    /// Parked by `pause_and_replace`; only the swap brings it back.
    Replacing,
    /// Sticky.
    Stopping,
}

struct State {
    engine:   Engine,
    stream:   DiffStream,
    /// The current run's population at `t = 0`.
    initial:  Vec<BodySnapshot>,
    mode:     Mode,
    /// Set by the producer while it waits in `Paused` or `Replacing`.
    parked:   bool,
    /// Set by the producer just before it returns.
    finished: bool,
    fault:    Option<SimError>,
}

struct Shared {
    state:  Mutex<State>,
    /// Every mode, `parked` or `finished` change is announced here.
    signal: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, State>) -> MutexGuard<'a, State> {
        self.signal.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}

// ── SimDriver ─────────────────────────────────────────────────────────────────

/// Owner of the simulation thread.
///
/// The thread is the only writer of body state.  Everything it publishes is
/// a value copy: diffs through the [`DiffStream`], whole populations through
/// [`current_bodies`][Self::current_bodies].
///
/// Dropping the driver terminates the thread and waits for it.
pub struct SimDriver {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl SimDriver {
    /// Validate `config`, build the population, and start producing.
    ///
    /// Configuration errors are reported before any thread exists.
    pub fn spawn(config: GasConfig) -> DriverResult<Self> {
        config.validate()?;
        let engine = Engine::new(&config)?;
        let initial = engine.snapshots();
        let stream = DiffStream::bounded(config.channel_capacity());

        let shared = Arc::new(Shared {
            state:  Mutex::new(State {
                engine,
                stream,
                initial,
                mode:     Mode::Running,
                parked:   false,
                finished: false,
                fault:    None,
            }),
            signal: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("simulation".into())
            .spawn(move || produce(&worker))
            .map_err(DriverError::Spawn)?;

        Ok(Self { shared, handle: Some(handle) })
    }

    /// Handle to the current run's stream.  After a replacement the old
    /// handle reports closed; fetch a new one.
    pub fn stream(&self) -> DiffStream {
        self.shared.lock().stream.clone()
    }

    /// The current run's population at `t = 0`.  Together with every diff
    /// from [`stream`][Self::stream] this reconstructs the run exactly.
    pub fn initial_bodies(&self) -> Vec<BodySnapshot> {
        self.shared.lock().initial.clone()
    }

    /// Copies of the engine's bodies as of its latest resolved event.
    ///
    /// The engine runs ahead of the consumer by up to a full stream, so this
    /// may be newer than the last diff received.
    pub fn current_bodies(&self) -> Vec<BodySnapshot> {
        self.shared.lock().engine.snapshots()
    }

    /// Engine clock and event count, read together.
    pub fn progress(&self) -> (f64, u64) {
        let st = self.shared.lock();
        (st.engine.now(), st.engine.events_resolved())
    }

    /// Stop producing after the diff in hand (if any) is delivered.
    /// Buffered diffs stay readable.
    pub fn pause(&self) {
        let mut st = self.shared.lock();
        if st.mode == Mode::Running {
            st.mode = Mode::Paused;
            self.shared.signal.notify_all();
        }
    }

    /// Undo [`pause`][Self::pause].  No effect while running or stopping.
    pub fn resume(&self) {
        let mut st = self.shared.lock();
        if st.mode == Mode::Paused {
            st.mode = Mode::Running;
            self.shared.signal.notify_all();
        }
    }

    /// Discard the current run and start a fresh one from `config`.
    ///
    /// Returns copies of the new population.  The old stream is closed and
    /// its buffered diffs dropped; no diff of the old run will ever appear on
    /// the new stream.  Production resumes even if the driver was paused.
    ///
    /// On any error the current run is left untouched.
    pub fn pause_and_replace(&self, config: GasConfig) -> DriverResult<Vec<BodySnapshot>> {
        config.validate()?;
        let engine = Engine::new(&config)?;
        let initial = engine.snapshots();
        let stream = DiffStream::bounded(config.channel_capacity());

        let mut st = self.shared.lock();
        if st.finished || st.mode == Mode::Stopping {
            return Err(DriverError::ProducerExited);
        }
        st.mode = Mode::Replacing;
        st.stream.close();
        self.shared.signal.notify_all();

        while !st.parked && !st.finished && st.mode != Mode::Stopping {
            st = self.shared.wait(st);
        }
        if st.finished || st.mode == Mode::Stopping {
            return Err(DriverError::ProducerExited);
        }

        st.engine = engine;
        st.stream = stream;
        st.initial = initial.clone();
        st.mode = Mode::Running;
        self.shared.signal.notify_all();
        Ok(initial)
    }

    /// Ask the producer to stop.  Returns immediately; the producer exits
    /// within one step.  Idempotent.
    pub fn terminate(&self) {
        let mut st = self.shared.lock();
        st.mode = Mode::Stopping;
        st.stream.close();
        self.shared.signal.notify_all();
    }

    /// `true` once the producer has returned.
    pub fn is_finished(&self) -> bool {
        self.shared.lock().finished
    }

    /// Terminate and wait for the producer.  Surfaces a fault it recorded.
    pub fn join(mut self) -> DriverResult<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> DriverResult<()> {
        self.terminate();
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        if handle.join().is_err() {
            return Err(DriverError::ProducerPanicked);
        }
        match self.shared.lock().fault.take() {
            Some(fault) => Err(DriverError::Sim(fault)),
            None => Ok(()),
        }
    }
}

impl Drop for SimDriver {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

// ── Producer ──────────────────────────────────────────────────────────────────

fn produce(shared: &Shared) {
    loop {
        let (diff, stream) = {
            let mut st = shared.lock();
            loop {
                match st.mode {
                    Mode::Stopping => {
                        st.finished = true;
                        st.parked = false;
                        shared.signal.notify_all();
                        return;
                    }
                    Mode::Paused | Mode::Replacing => {
                        if !st.parked {
                            st.parked = true;
                            shared.signal.notify_all();
                        }
                        st = shared.wait(st);
                    }
                    Mode::Running => {
                        st.parked = false;
                        break;
                    }
                }
            }
            match st.engine.step() {
                Ok(diff) => (diff, st.stream.clone()),
                Err(fault) => {
                    st.fault = Some(fault);
                    st.finished = true;
                    st.stream.close();
                    shared.signal.notify_all();
                    return;
                }
            }
        };

        // A stream is only closed on the way to Replacing or Stopping, so a
        // failed send drops the diff and the next pass parks or exits.
        let _ = stream.send(diff);
    }
}
