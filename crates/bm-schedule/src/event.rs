//! Predicted collisions.

use bm_core::{BodyId, Wall};
use ordered_float::NotNan;

use crate::{ScheduleError, ScheduleResult};

/// What collides with what.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `body` reaches `wall`.
    Wall { body: BodyId, wall: Wall },
    /// Bodies `a` and `b` touch.  `a != b`.
    Particle { a: BodyId, b: BodyId },
}

impl EventKind {
    /// `true` if `body` takes part in this event.
    #[inline]
    pub fn involves(&self, body: BodyId) -> bool {
        match *self {
            EventKind::Wall { body: b, .. } => b == body,
            EventKind::Particle { a, b } => a == body || b == body,
        }
    }

    /// The one or two participants, first participant first.
    #[inline]
    pub fn participants(&self) -> (BodyId, Option<BodyId>) {
        match *self {
            EventKind::Wall { body, .. } => (body, None),
            EventKind::Particle { a, b } => (a, Some(b)),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Wall { body, wall } => write!(f, "wall:{wall} {body}"),
            EventKind::Particle { a, b } => write!(f, "particle {a} {b}"),
        }
    }
}

/// A collision predicted to happen at `time`.
///
/// `scheduled_at` is the simulation time the prediction was made.  A
/// prediction is only trustworthy while none of its participants has started
/// a newer leg, i.e. while `scheduled_at >= reference_time` for each of them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    time:         NotNan<f64>,
    kind:         EventKind,
    scheduled_at: f64,
}

impl Event {
    /// Create an event, rejecting infinite or NaN times: "never" is not
    /// something the queue stores.
    pub fn new(time: f64, kind: EventKind, scheduled_at: f64) -> ScheduleResult<Self> {
        if !time.is_finite() {
            return Err(ScheduleError::NonFiniteTime(time));
        }
        let time = NotNan::new(time).map_err(|_| ScheduleError::NonFiniteTime(time))?;
        Ok(Self { time, kind, scheduled_at })
    }

    pub fn wall(time: f64, body: BodyId, wall: Wall, scheduled_at: f64) -> ScheduleResult<Self> {
        Self::new(time, EventKind::Wall { body, wall }, scheduled_at)
    }

    pub fn particle(time: f64, a: BodyId, b: BodyId, scheduled_at: f64) -> ScheduleResult<Self> {
        debug_assert_ne!(a, b, "a body cannot collide with itself");
        Self::new(time, EventKind::Particle { a, b }, scheduled_at)
    }

    /// Absolute occurrence time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time.into_inner()
    }

    #[inline]
    pub(crate) fn key_time(&self) -> NotNan<f64> {
        self.time
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[inline]
    pub fn scheduled_at(&self) -> f64 {
        self.scheduled_at
    }

    #[inline]
    pub fn involves(&self, body: BodyId) -> bool {
        self.kind.involves(body)
    }
}
