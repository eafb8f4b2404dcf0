//! Immutable run configuration.
//!
//! A `GasConfig` is handed to the engine at construction and again on every
//! reset.  Nothing in the engine reads configuration from anywhere else, so
//! two engines built from two configs never influence each other.

use crate::{BmError, BmResult};

/// Light bodies draw their initial speed from `[0, 1.5 × max_start_speed)`;
/// heavy bodies from `[0, max_start_speed)`.
pub const LIGHT_SPEED_SCALE: f64 = 1.5;

// ── PopulationProfile ─────────────────────────────────────────────────────────

/// Shared physical parameters of one body class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationProfile {
    /// Number of bodies of this class.  May be zero as long as the other
    /// class is not.
    pub count: usize,
    pub mass: f64,
    pub radius: f64,
    /// Nominal cap on the initial speed (see [`LIGHT_SPEED_SCALE`]).
    pub max_start_speed: f64,
}

impl PopulationProfile {
    /// Default light class: 500 bodies, mass 10, radius 5, speed cap 0.3.
    pub fn light() -> Self {
        Self { count: 500, mass: 10.0, radius: 5.0, max_start_speed: 0.3 }
    }

    /// Default heavy class: 10 bodies, mass 100, radius 10, speed cap 0.1.
    pub fn heavy() -> Self {
        Self { count: 10, mass: 100.0, radius: 10.0, max_start_speed: 0.1 }
    }

    fn validate(&self, class: &str, width: u32, height: u32) -> BmResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(BmError::Config(format!("{class} mass must be finite and > 0")));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(BmError::Config(format!("{class} radius must be finite and > 0")));
        }
        if !self.max_start_speed.is_finite() || self.max_start_speed <= 0.0 {
            return Err(BmError::Config(format!(
                "{class} max_start_speed must be finite and > 0"
            )));
        }
        // A body exactly one diameter wide touches both walls at once and
        // would bounce between them at zero time forever.
        let diameter = 2.0 * self.radius;
        if self.count > 0 && (diameter >= width as f64 || diameter >= height as f64) {
            return Err(BmError::Config(format!(
                "{class} bodies (radius {}) do not fit in a {width}x{height} box",
                self.radius
            )));
        }
        Ok(())
    }
}

// ── GasConfig ─────────────────────────────────────────────────────────────────

/// Everything needed to (re)initialize a simulation.
///
/// Typically built with [`GasConfig::new`] or loaded from JSON by the
/// application and passed to the engine or driver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GasConfig {
    pub light: PopulationProfile,
    pub heavy: PopulationProfile,
    /// Container width (x extent).
    pub width: u32,
    /// Container height (y extent).
    pub height: u32,
    /// Seed for initial velocities.  The same seed always produces the same run.
    pub seed: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            light:  PopulationProfile::light(),
            heavy:  PopulationProfile::heavy(),
            width:  800,
            height: 600,
            seed:   0,
        }
    }
}

impl GasConfig {
    /// Default class profiles with the given counts, box, and seed.
    pub fn new(light_count: usize, heavy_count: usize, width: u32, height: u32, seed: u64) -> Self {
        Self {
            light: PopulationProfile { count: light_count, ..PopulationProfile::light() },
            heavy: PopulationProfile { count: heavy_count, ..PopulationProfile::heavy() },
            width,
            height,
            seed,
        }
    }

    /// Total number of bodies across both classes.  Saturates; a count that
    /// large is rejected by [`validate`][Self::validate].
    #[inline]
    pub fn total_bodies(&self) -> usize {
        self.light.count.saturating_add(self.heavy.count)
    }

    /// Diff channel capacity: two diffs per body.  Saturates like
    /// [`total_bodies`][Self::total_bodies].
    #[inline]
    pub fn channel_capacity(&self) -> usize {
        self.total_bodies().saturating_mul(2)
    }

    /// Check every parameter before any body is built or thread started.
    pub fn validate(&self) -> BmResult<()> {
        let total = self
            .light
            .count
            .checked_add(self.heavy.count)
            .filter(|&n| n <= u32::MAX as usize)
            .ok_or_else(|| BmError::Config("population exceeds the body id range".into()))?;
        if total.checked_mul(2).is_none() {
            return Err(BmError::Config("channel capacity overflows".into()));
        }
        if total == 0 {
            return Err(BmError::Config("population must contain at least one body".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(BmError::Config("width and height must be > 0".into()));
        }
        self.light.validate("light", self.width, self.height)?;
        self.heavy.validate("heavy", self.width, self.height)?;
        Ok(())
    }
}
