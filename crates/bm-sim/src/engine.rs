//! The `Engine` struct and its event loop.

use bm_collision::{resolve_particles, resolve_wall, time_to_collide, time_to_hit_wall};
use bm_core::{Body, BodyId, BodySnapshot, GasConfig, Vec2};
use bm_schedule::{Event, EventKind, EventQueue};

use crate::{EngineBuilder, SimDiff, SimError, SimObserver, SimResult};

// ── Engine ────────────────────────────────────────────────────────────────────

/// The collision-driven simulation.
///
/// `Engine` owns the body arena and the event queue and advances by exactly
/// one collision per [`step`][Self::step]:
///
/// 1. **Pop**: take the earliest live event (dead ones are skipped).
/// 2. **Resolve**: move the participants to the event time and update their
///    velocities.
/// 3. **Invalidate**: every pending event naming a participant goes dead.
/// 4. **Re-predict**: push one wall event and every finite pair event for
///    each participant, stamped with the current time.
///
/// Between steps every moving body has exactly one live wall event, and no
/// live event was predicted before one of its participants last changed
/// course.
///
/// Create via [`Engine::new`] or [`EngineBuilder`].
#[derive(Debug)]
pub struct Engine {
    /// Dense arena; `bodies[i].id() == BodyId(i)`.
    bodies:          Vec<Body>,
    queue:           EventQueue,
    width:           f64,
    height:          f64,
    /// Time of the last resolved event.
    now:             f64,
    events_resolved: u64,
}

impl Engine {
    /// Validate `config` and build a fresh population, every body at the
    /// centre of the box with a random direction and speed.
    pub fn new(config: &GasConfig) -> SimResult<Self> {
        EngineBuilder::from_config(config)?.build()
    }

    /// Build the initial schedule: one wall event per body and one event per
    /// unordered pair with a finite contact time.
    pub(crate) fn seeded(bodies: Vec<Body>, width: f64, height: f64) -> SimResult<Self> {
        let mut engine = Self {
            bodies,
            queue: EventQueue::new(),
            width,
            height,
            now: 0.0,
            events_resolved: 0,
        };
        for i in 0..engine.bodies.len() {
            engine.push_wall_event(i)?;
            engine.push_pair_events(i, |j| j > i)?;
        }
        Ok(engine)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Resolve the next collision and return the bodies it changed.
    ///
    /// Errors with [`SimError::ScheduleExhausted`] if no live event remains,
    /// which only happens for an empty or fully stationary population.
    pub fn step(&mut self) -> SimResult<SimDiff> {
        let event = self
            .queue
            .pop_next_live()
            .ok_or(SimError::ScheduleExhausted { time: self.now })?;

        debug_assert!(event.time() >= self.now, "event at {} before now {}", event.time(), self.now);
        let time = event.time().max(self.now);
        self.now = time;

        let affected: Vec<usize> = match event.kind() {
            EventKind::Wall { body, wall } => {
                resolve_wall(time, &mut self.bodies[body.index()], wall);
                vec![body.index()]
            }
            EventKind::Particle { a, b } => {
                let (x, y) = pair_mut(&mut self.bodies, a.index(), b.index());
                resolve_particles(time, x, y);
                vec![a.index(), b.index()]
            }
        };

        for &i in &affected {
            self.queue.invalidate_all(self.bodies[i].id());
        }
        // A pair of two participants is predicted once, from the first.
        for (k, &i) in affected.iter().enumerate() {
            let done = &affected[..k];
            self.push_wall_event(i)?;
            self.push_pair_events(i, |j| j != i && !done.contains(&j))?;
        }

        self.events_resolved += 1;
        Ok(SimDiff {
            time,
            cause:  event.kind(),
            bodies: affected.iter().map(|&i| self.bodies[i].snapshot()).collect(),
        })
    }

    /// Resolve exactly `n` events, reporting each to `observer`.
    pub fn run_events<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let diff = self.step()?;
            observer.on_event(&diff);
        }
        observer.on_run_end(self.now, self.events_resolved);
        Ok(())
    }

    /// Resolve every event with `time <= until`.  Returns how many were
    /// resolved.  Bodies are left on their current legs, so
    /// `position_at(until)` is exact afterwards.
    pub fn advance_until<O: SimObserver>(&mut self, until: f64, observer: &mut O) -> SimResult<u64> {
        let mut resolved = 0;
        loop {
            let next = self
                .queue
                .peek_next_time()
                .ok_or(SimError::ScheduleExhausted { time: self.now })?;
            if next > until {
                break;
            }
            let diff = self.step()?;
            observer.on_event(&diff);
            resolved += 1;
        }
        observer.on_run_end(self.now, self.events_resolved);
        Ok(resolved)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Value copies of every body, in id order.
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    /// Time of the last resolved event (`0.0` before the first).
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `Σ ½ m |v|²` over all bodies.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// `Σ m v` over all bodies.
    pub fn momentum(&self) -> Vec2 {
        self.bodies.iter().fold(Vec2::ZERO, |acc, b| acc + b.momentum())
    }

    #[inline]
    pub fn events_resolved(&self) -> u64 {
        self.events_resolved
    }

    /// Invalidated events dropped from the queue so far.
    #[inline]
    pub fn stale_discarded(&self) -> u64 {
        self.queue.discarded()
    }

    /// Read-only view of the pending events.
    #[inline]
    pub fn schedule(&self) -> &EventQueue {
        &self.queue
    }

    // ── Prediction ────────────────────────────────────────────────────────

    fn push_wall_event(&mut self, i: usize) -> SimResult<()> {
        let body = &self.bodies[i];
        if let Some(hit) = time_to_hit_wall(body, self.width, self.height) {
            let event = Event::wall(hit.time, body.id(), hit.wall, self.now)?;
            self.queue.push(event);
        }
        Ok(())
    }

    fn push_pair_events<F>(&mut self, i: usize, candidate: F) -> SimResult<()>
    where
        F: Fn(usize) -> bool + Sync,
    {
        let a = self.bodies[i].id();
        for (j, time) in predict_pairs(&self.bodies, i, candidate) {
            let event = Event::particle(time, a, self.bodies[j].id(), self.now)?;
            self.queue.push(event);
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Finite contact times between `bodies[i]` and every `bodies[j]` accepted by
/// `candidate`, in ascending `j`.
fn predict_pairs<F>(bodies: &[Body], i: usize, candidate: F) -> Vec<(usize, f64)>
where
    F: Fn(usize) -> bool + Sync,
{
    let me = &bodies[i];

    #[cfg(not(feature = "parallel"))]
    {
        (0..bodies.len())
            .filter(|&j| candidate(j))
            .filter_map(|j| {
                let t = time_to_collide(me, &bodies[j]);
                t.is_finite().then_some((j, t))
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        // `collect` keeps the index order of the source range.
        (0..bodies.len())
            .into_par_iter()
            .filter(|&j| candidate(j))
            .filter_map(|j| {
                let t = time_to_collide(me, &bodies[j]);
                t.is_finite().then_some((j, t))
            })
            .collect()
    }
}

/// Disjoint `&mut` to two distinct arena slots, in argument order.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
