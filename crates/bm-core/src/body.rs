//! Rigid circular bodies with piecewise-linear motion.
//!
//! # Trajectory model
//!
//! A body never stores "its current position".  It stores the instant its
//! current straight-line leg began and where it was at that instant:
//!
//! ```text
//! position(t) = reference_position + velocity * (t - reference_time)
//! ```
//!
//! Only a resolved collision starts a new leg, so between collisions a body
//! costs nothing to advance.  `reference_time` never moves backwards.

use crate::{BmError, BmResult, BodyId, Vec2};

// ── Body ──────────────────────────────────────────────────────────────────────

/// A live body in the engine's arena.
///
/// Mass and radius are fixed at construction.  Kinematic state is only
/// changed through [`advance_to`][Self::advance_to] and
/// [`set_velocity`][Self::set_velocity], which the collision resolver calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    id:                 BodyId,
    mass:               f64,
    radius:             f64,
    reference_position: Vec2,
    velocity:           Vec2,
    reference_time:     f64,
}

impl Body {
    /// Create a body whose first leg starts at `t = 0`.
    ///
    /// Errors with [`BmError::InvalidBody`] if mass or radius is not finite
    /// and positive, or if position/velocity contain NaN or infinity.
    pub fn new(id: BodyId, position: Vec2, velocity: Vec2, mass: f64, radius: f64) -> BmResult<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(BmError::InvalidBody { id, reason: "mass must be finite and > 0" });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(BmError::InvalidBody { id, reason: "radius must be finite and > 0" });
        }
        if !position.is_finite() {
            return Err(BmError::InvalidBody { id, reason: "position must be finite" });
        }
        if !velocity.is_finite() {
            return Err(BmError::InvalidBody { id, reason: "velocity must be finite" });
        }
        Ok(Self {
            id,
            mass,
            radius,
            reference_position: position,
            velocity,
            reference_time: 0.0,
        })
    }

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Where the current leg began.
    #[inline]
    pub fn reference_position(&self) -> Vec2 {
        self.reference_position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// When the current leg began.
    #[inline]
    pub fn reference_time(&self) -> f64 {
        self.reference_time
    }

    /// Position at absolute time `t` (meaningful for `t >= reference_time`).
    #[inline]
    pub fn position_at(&self, t: f64) -> Vec2 {
        self.reference_position + self.velocity * (t - self.reference_time)
    }

    /// Start a new leg at `time`: the reference point moves to where the body
    /// is at that instant.  Times earlier than the current reference are
    /// ignored so the reference clock stays monotone.
    pub fn advance_to(&mut self, time: f64) {
        debug_assert!(
            time >= self.reference_time,
            "{} advanced backwards: {time} < {}",
            self.id,
            self.reference_time,
        );
        if time <= self.reference_time {
            return;
        }
        self.reference_position = self.position_at(time);
        self.reference_time = time;
    }

    /// Replace the velocity of the current leg.  Call after
    /// [`advance_to`][Self::advance_to] so the old leg ends where it should.
    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// `½ m |v|²`.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// `m v`.
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// An independent value copy for consumers.
    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id:                 self.id,
            radius:             self.radius,
            mass:               self.mass,
            reference_position: self.reference_position,
            velocity:           self.velocity,
            reference_time:     self.reference_time,
        }
    }
}

// ── BodySnapshot ──────────────────────────────────────────────────────────────

/// Point-in-time copy of a [`Body`].
///
/// Snapshots are plain values: nothing the engine does afterwards is visible
/// through one, so consumers may keep them indefinitely and on any thread.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodySnapshot {
    pub id:                 BodyId,
    pub radius:             f64,
    pub mass:               f64,
    pub reference_position: Vec2,
    pub velocity:           Vec2,
    pub reference_time:     f64,
}

impl BodySnapshot {
    /// Position at absolute time `t`, extrapolated along the captured leg.
    #[inline]
    pub fn position_at(&self, t: f64) -> Vec2 {
        self.reference_position + self.velocity * (t - self.reference_time)
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }
}
