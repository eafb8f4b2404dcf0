//! Consumer-side copy of the population, kept current by applying diffs.

use bm_core::{BodyId, BodySnapshot, Vec2};
use bm_sim::{SimDiff, SimObserver};

use crate::DiffStream;

/// A consumer's view of every body, rebuilt from an initial population plus
/// the diffs read from a [`DiffStream`].
///
/// Bodies are addressed by id, which is their index in the population.  A
/// snapshot is only replaced by one with an equal or later
/// `reference_time`, so replaying a diff twice is harmless.
///
/// [`sync_to`][Self::sync_to] may pull one diff that lies in the future of
/// the requested time; it is held back and applied first by the next call.
#[derive(Clone, Debug, Default)]
pub struct BodyMirror {
    bodies:  Vec<BodySnapshot>,
    /// Time of the latest diff applied.
    time:    f64,
    applied: u64,
    pending: Option<SimDiff>,
}

impl BodyMirror {
    /// Start from a full population, e.g. from
    /// [`SimDriver::initial_bodies`][crate::SimDriver::initial_bodies] or the
    /// result of [`pause_and_replace`][crate::SimDriver::pause_and_replace].
    pub fn new(mut bodies: Vec<BodySnapshot>) -> Self {
        bodies.sort_by_key(|s| s.id);
        let time = bodies.iter().map(|s| s.reference_time).fold(0.0, f64::max);
        Self { bodies, time, applied: 0, pending: None }
    }

    /// Discard everything and start over from `bodies`.
    pub fn reset(&mut self, bodies: Vec<BodySnapshot>) {
        *self = Self::new(bodies);
    }

    /// Overwrite the bodies `diff` changed.  Returns how many were updated;
    /// ids outside the population are ignored.
    pub fn apply(&mut self, diff: &SimDiff) -> usize {
        let mut updated = 0;
        for snap in &diff.bodies {
            let Some(slot) = self.bodies.get_mut(snap.id.index()) else {
                continue;
            };
            if slot.id == snap.id && snap.reference_time >= slot.reference_time {
                *slot = *snap;
                updated += 1;
            }
        }
        self.time = self.time.max(diff.time);
        self.applied += 1;
        updated
    }

    /// Apply every buffered diff with `time < t`, in order, without
    /// blocking.  Each applied diff is also handed to `observer`.  Returns
    /// how many diffs were applied.
    pub fn catch_up<O: SimObserver>(&mut self, stream: &DiffStream, t: f64, observer: &mut O) -> usize {
        let mut n = 0;
        if let Some(diff) = self.pending.take_if(|d| d.time < t) {
            self.apply(&diff);
            observer.on_event(&diff);
            n += 1;
        }
        if self.pending.is_some() {
            return n;
        }
        while let Ok(diff) = stream.try_recv_before(t) {
            self.apply(&diff);
            observer.on_event(&diff);
            n += 1;
        }
        n
    }

    /// Apply every diff with `time < t`, blocking on the stream until a diff
    /// at or after `t` shows up (it is held back) or the stream closes.
    ///
    /// After this returns normally the mirror is exact at time `t`.
    pub fn sync_to<O: SimObserver>(&mut self, stream: &DiffStream, t: f64, observer: &mut O) -> usize {
        let mut n = 0;
        loop {
            let diff = match self.pending.take() {
                Some(diff) => diff,
                None => match stream.recv() {
                    Some(diff) => diff,
                    None => return n,
                },
            };
            if diff.time >= t {
                self.pending = Some(diff);
                return n;
            }
            self.apply(&diff);
            observer.on_event(&diff);
            n += 1;
        }
    }

    /// Time of the held-back diff, if [`sync_to`][Self::sync_to] left one.
    pub fn pending_time(&self) -> Option<f64> {
        self.pending.as_ref().map(|d| d.time)
    }

    pub fn get(&self, id: BodyId) -> Option<&BodySnapshot> {
        self.bodies.get(id.index())
    }

    /// Where `id` is at time `t`, extrapolated along its last known leg.
    pub fn position_at(&self, id: BodyId, t: f64) -> Option<Vec2> {
        self.get(id).map(|s| s.position_at(t))
    }

    /// Every body's position at `t`, in id order.
    pub fn positions_at(&self, t: f64) -> impl Iterator<Item = (BodyId, Vec2)> + '_ {
        self.bodies.iter().map(move |s| (s.id, s.position_at(t)))
    }

    #[inline]
    pub fn bodies(&self) -> &[BodySnapshot] {
        &self.bodies
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Time of the latest diff applied (or of the initial population).
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Diffs applied since construction or the last reset.
    #[inline]
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// `Σ ½ m |v|²` over the mirrored bodies.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(BodySnapshot::kinetic_energy).sum()
    }

    /// `Σ m v` over the mirrored bodies.
    pub fn momentum(&self) -> Vec2 {
        self.bodies.iter().fold(Vec2::ZERO, |acc, s| acc + s.momentum())
    }
}
