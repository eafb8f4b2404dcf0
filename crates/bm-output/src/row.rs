//! Plain data row types written by output backends.

use bm_core::{BodySnapshot, Wall};
use bm_schedule::EventKind;
use bm_sim::SimDiff;

/// Post-collision state of one body changed by one event.
///
/// A wall event produces one row, a particle event two, sharing
/// `event_index` and `time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRow {
    /// Running index of the event within the log, starting at 0.
    pub event_index: u64,
    pub time:        f64,
    /// The wall hit, or `None` for a particle–particle event.
    pub wall:        Option<Wall>,
    pub body_id:     u32,
    /// The other body of a particle event; `None` for a wall event.
    pub partner_id:  Option<u32>,
    pub mass:        f64,
    pub radius:      f64,
    pub x:           f64,
    pub y:           f64,
    pub vx:          f64,
    pub vy:          f64,
}

impl CollisionRow {
    /// One row per body in `diff`.
    pub fn from_diff(event_index: u64, diff: &SimDiff) -> Vec<CollisionRow> {
        diff.bodies
            .iter()
            .map(|snap| Self::from_snapshot(event_index, diff, snap))
            .collect()
    }

    fn from_snapshot(event_index: u64, diff: &SimDiff, snap: &BodySnapshot) -> Self {
        let (wall, partner_id) = match diff.cause {
            EventKind::Wall { wall, .. } => (Some(wall), None),
            EventKind::Particle { a, b } => {
                let partner = if snap.id == a { b } else { a };
                (None, Some(partner.0))
            }
        };
        let p = snap.position_at(diff.time);
        Self {
            event_index,
            time: diff.time,
            wall,
            body_id: snap.id.0,
            partner_id,
            mass: snap.mass,
            radius: snap.radius,
            x: p.x,
            y: p.y,
            vx: snap.velocity.x,
            vy: snap.velocity.y,
        }
    }
}

/// Totals reported when a bounded run ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummaryRow {
    pub time:            f64,
    /// The engine's running event count.
    pub events_resolved: u64,
    /// Events written to the log so far.
    pub events_logged:   u64,
}
