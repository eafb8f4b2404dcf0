//! The four sides of the rectangular container.

/// A side of the container.  `TOP` is `y = 0`, `LEFT` is `x = 0`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

impl Wall {
    /// `true` for the walls whose normal lies along `x`.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Wall::Top    => "top",
            Wall::Bottom => "bottom",
            Wall::Left   => "left",
            Wall::Right  => "right",
        }
    }
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
