//! Strongly typed body identifier.
//!
//! A `BodyId` is the body's slot in the engine's dense arena: ids are handed
//! out as `0..N` when a population is built and never change for the life of
//! that engine.  Equality and hashing go through the integer, never through
//! an address, so snapshots of the same body compare equal by id no matter
//! which thread produced them.

use std::fmt;

/// Index of a body in the engine's arena.  Max ~4.3 billion bodies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyId(pub u32);

impl BodyId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyId({})", self.0)
    }
}

impl TryFrom<usize> for BodyId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<BodyId, Self::Error> {
        u32::try_from(n).map(BodyId)
    }
}
