//! The unit of output: one resolved collision.

use bm_core::{BodyId, BodySnapshot};
use bm_schedule::EventKind;

/// Post-collision state of every body a single event changed.
///
/// `bodies` holds one snapshot for a wall event and two for a particle
/// event, in participant order.  Diffs are plain values and can be sent to
/// any thread.
#[derive(Clone, Debug, PartialEq)]
pub struct SimDiff {
    /// Absolute time of the collision.
    pub time:   f64,
    pub cause:  EventKind,
    pub bodies: Vec<BodySnapshot>,
}

impl SimDiff {
    /// Snapshot of `id` if this diff changed it.
    pub fn get(&self, id: BodyId) -> Option<&BodySnapshot> {
        self.bodies.iter().find(|s| s.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
