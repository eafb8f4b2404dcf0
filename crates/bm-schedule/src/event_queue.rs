//! `EventQueue` — time-ordered collision events with lazy invalidation.
//!
//! # Why lazy
//!
//! Every resolved collision makes all pending predictions involving its
//! participants obsolete.  Removing arbitrary entries from a binary heap is
//! O(n) each, so instead the queue flips a `live` flag on every affected
//! entry and simply skips dead entries when they surface at the top.
//!
//! | Operation         | Cost                                          |
//! |-------------------|-----------------------------------------------|
//! | `push`            | O(log n)                                      |
//! | `pop_next_live`   | O(log n) amortized (dead entries paid once)   |
//! | `invalidate_all`  | O(entries) scan                               |
//!
//! # Ordering
//!
//! Entries are ordered by `(time, insertion sequence)`.  Ties in time are
//! therefore resolved first-pushed-first-popped, which keeps runs with
//! simultaneous collisions reproducible.
//!
//! # Memory
//!
//! Dead entries are kept until they surface.  Far-future dead entries could
//! pile up for a long time, so once dead entries number at least
//! [`COMPACT_RATIO`] times the live ones (and at least [`COMPACT_MIN_DEAD`]),
//! the heap is rebuilt from the live entries alone.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bm_core::BodyId;
use ordered_float::NotNan;

use crate::Event;

/// Compact once `dead >= COMPACT_RATIO * live`.
pub const COMPACT_RATIO: usize = 4;

/// Compact only once at least this many entries are dead.
pub const COMPACT_MIN_DEAD: usize = 1024;

/// Heap key: slot index into `EventQueue::slots`, ordered by time then
/// insertion sequence.  Field order matters for the derived `Ord`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct QueueKey {
    time: NotNan<f64>,
    seq:  u64,
    slot: usize,
}

#[derive(Debug)]
struct Entry {
    event: Event,
    live:  bool,
}

/// A min-priority queue of collision events with per-body invalidation.
#[derive(Default, Debug)]
pub struct EventQueue {
    heap:      BinaryHeap<Reverse<QueueKey>>,
    /// Event storage addressed by `QueueKey::slot`.  `None` = free slot.
    slots:     Vec<Option<Entry>>,
    free:      Vec<usize>,
    next_seq:  u64,
    /// Cached live entry count for O(1) `live_len()`.
    live:      usize,
    /// Dead entries dropped by `pop_next_live` / `compact` since creation.
    discarded: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `event` as live.
    pub fn push(&mut self, event: Event) {
        let key_time = event.key_time();
        let entry = Entry { event, live: true };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(QueueKey { time: key_time, seq, slot }));
        self.live += 1;
    }

    /// Remove and return the earliest live event, dropping any dead entries
    /// ahead of it.  `None` once no live event remains.
    pub fn pop_next_live(&mut self) -> Option<Event> {
        while let Some(Reverse(key)) = self.heap.pop() {
            let entry = self.slots[key.slot].take();
            self.free.push(key.slot);
            match entry {
                Some(Entry { event, live: true }) => {
                    self.live -= 1;
                    return Some(event);
                }
                _ => self.discarded += 1,
            }
        }
        None
    }

    /// Time of the earliest live event without removing it.
    ///
    /// Takes `&mut self` because dead entries found at the top are dropped.
    pub fn peek_next_time(&mut self) -> Option<f64> {
        while let Some(&Reverse(key)) = self.heap.peek() {
            let live = self.slots[key.slot].as_ref().is_some_and(|e| e.live);
            if live {
                return Some(key.time.into_inner());
            }
            self.heap.pop();
            self.slots[key.slot] = None;
            self.free.push(key.slot);
            self.discarded += 1;
        }
        None
    }

    /// Mark dead every live event that involves `body`.  Returns how many
    /// entries were invalidated.
    pub fn invalidate_all(&mut self, body: BodyId) -> usize {
        let mut n = 0;
        for entry in self.slots.iter_mut().flatten() {
            if entry.live && entry.event.involves(body) {
                entry.live = false;
                n += 1;
            }
        }
        self.live -= n;
        if self.should_compact() {
            self.compact();
        }
        n
    }

    /// Rebuild the heap from live entries only, releasing every dead slot.
    pub fn compact(&mut self) {
        let slots = &self.slots;
        self.heap
            .retain(|Reverse(key)| slots[key.slot].as_ref().is_some_and(|e| e.live));
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|e| !e.live) {
                *slot = None;
                self.free.push(i);
                self.discarded += 1;
            }
        }
    }

    /// Iterate over live events in no particular order.
    pub fn live_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.slots
            .iter()
            .flatten()
            .filter(|e| e.live)
            .map(|e| &e.event)
    }

    /// Number of live events.
    pub fn live_len(&self) -> usize {
        self.live
    }

    /// Number of dead entries still held.
    pub fn dead_len(&self) -> usize {
        self.heap.len() - self.live
    }

    /// Total entries held, live and dead.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `true` when no live event remains (dead entries may still be held).
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Dead entries dropped so far.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    fn should_compact(&self) -> bool {
        let dead = self.dead_len();
        dead >= COMPACT_MIN_DEAD && dead >= COMPACT_RATIO * self.live
    }
}
