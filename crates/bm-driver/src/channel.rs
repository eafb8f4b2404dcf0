//! `DiffStream` — the bounded FIFO between the producer and its consumer.
//!
//! # Semantics
//!
//! | Call              | Open, not full        | Open, full       | Closed          |
//! |-------------------|-----------------------|------------------|-----------------|
//! | `send`            | enqueue               | block            | `Err(diff)`     |
//! | `recv`            | dequeue or block      | dequeue          | `None`          |
//! | `try_recv`        | dequeue or `Empty`    | dequeue          | `Closed`        |
//! | `wait_loaded`     | block until full      | `true`           | `false`         |
//!
//! Closing discards whatever is still buffered: a stream is only closed when
//! its run is replaced or the driver stops, and either way the remaining
//! diffs describe a population nobody will look at again.  Every blocked
//! caller wakes on close.
//!
//! Handles are cheap clones of one shared buffer; only the driver sends.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use bm_sim::SimDiff;

use crate::TryRecvError;

struct StreamState {
    buf:    VecDeque<SimDiff>,
    closed: bool,
}

struct Inner {
    state:     Mutex<StreamState>,
    /// Signalled on every enqueue and on close.
    not_empty: Condvar,
    /// Signalled on every dequeue and on close.
    not_full:  Condvar,
    capacity:  usize,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, StreamState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A blocking, bounded, closable queue of [`SimDiff`]s.
#[derive(Clone)]
pub struct DiffStream {
    inner: Arc<Inner>,
}

impl DiffStream {
    /// A fresh open stream holding at most `capacity` diffs (at least one).
    pub(crate) fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Inner {
                state:     Mutex::new(StreamState {
                    buf:    VecDeque::with_capacity(capacity),
                    closed: false,
                }),
                not_empty: Condvar::new(),
                not_full:  Condvar::new(),
                capacity,
            }),
        }
    }

    // ── Producer side ─────────────────────────────────────────────────────

    /// Enqueue `diff`, blocking while the buffer is full.  Hands the diff
    /// back if the stream is (or becomes) closed.
    pub(crate) fn send(&self, diff: SimDiff) -> Result<(), SimDiff> {
        let mut st = self.inner.lock();
        loop {
            if st.closed {
                return Err(diff);
            }
            if st.buf.len() < self.inner.capacity {
                st.buf.push_back(diff);
                drop(st);
                self.inner.not_empty.notify_all();
                return Ok(());
            }
            st = self.inner.not_full.wait(st).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Close the stream, drop buffered diffs, and wake every waiter.
    /// Idempotent.
    pub(crate) fn close(&self) {
        let mut st = self.inner.lock();
        st.closed = true;
        st.buf.clear();
        drop(st);
        self.inner.not_empty.notify_all();
        self.inner.not_full.notify_all();
    }

    // ── Consumer side ─────────────────────────────────────────────────────

    /// Next diff in production order, blocking until one is available.
    /// `None` once the stream is closed.
    pub fn recv(&self) -> Option<SimDiff> {
        let mut st = self.inner.lock();
        loop {
            if st.closed {
                return None;
            }
            if let Some(diff) = st.buf.pop_front() {
                drop(st);
                self.inner.not_full.notify_all();
                return Some(diff);
            }
            st = self.inner.not_empty.wait(st).unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn try_recv(&self) -> Result<SimDiff, TryRecvError> {
        self.pop_if(|_| true)
    }

    /// Dequeue the head only if it happened strictly before `time`.
    ///
    /// Never blocks.  This is the draw-loop rule: a consumer showing time
    /// `t` applies every diff with `diff.time < t` and leaves the rest.
    pub fn try_recv_before(&self, time: f64) -> Result<SimDiff, TryRecvError> {
        self.pop_if(|d| d.time < time)
    }

    /// Like [`recv`][Self::recv] but gives up after `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SimDiff, TryRecvError> {
        let deadline = Instant::now() + timeout;
        let mut st = self.inner.lock();
        loop {
            if st.closed {
                return Err(TryRecvError::Closed);
            }
            if let Some(diff) = st.buf.pop_front() {
                drop(st);
                self.inner.not_full.notify_all();
                return Ok(diff);
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Err(TryRecvError::Empty);
            }
            st = self
                .inner
                .not_empty
                .wait_timeout(st, left)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Block until the buffer is full (the "loaded" signal), the stream is
    /// closed, or `timeout` elapses.  Returns `true` only when full.
    pub fn wait_loaded(&self, timeout: Duration) -> bool {
        let cap = self.inner.capacity;
        let st = self.inner.lock();
        let (st, _) = self
            .inner
            .not_empty
            .wait_timeout_while(st, timeout, |s| !s.closed && s.buf.len() < cap)
            .unwrap_or_else(PoisonError::into_inner);
        !st.closed && st.buf.len() >= cap
    }

    /// Blocking iterator over diffs; ends when the stream is closed.
    pub fn iter(&self) -> impl Iterator<Item = SimDiff> + '_ {
        std::iter::from_fn(move || self.recv())
    }

    // ── State ─────────────────────────────────────────────────────────────

    /// Number of diffs currently buffered.
    pub fn len(&self) -> usize {
        self.inner.lock().buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    fn pop_if(&self, accept: impl FnOnce(&SimDiff) -> bool) -> Result<SimDiff, TryRecvError> {
        let mut st = self.inner.lock();
        if st.closed {
            return Err(TryRecvError::Closed);
        }
        if !st.buf.front().is_some_and(accept) {
            return Err(TryRecvError::Empty);
        }
        let diff = st.buf.pop_front().ok_or(TryRecvError::Empty)?;
        drop(st);
        self.inner.not_full.notify_all();
        Ok(diff)
    }
}

impl std::fmt::Debug for DiffStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.inner.lock();
        f.debug_struct("DiffStream")
            .field("len", &st.buf.len())
            .field("capacity", &self.inner.capacity)
            .field("closed", &st.closed)
            .finish()
    }
}
