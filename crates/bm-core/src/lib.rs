//! `bm-core` — foundational types for the event-driven hard-disc gas engine.
//!
//! This crate is a dependency of every other `bm-*` crate.  It intentionally
//! has no `bm-*` dependencies and minimal external ones (`glam`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BodyId`                                              |
//! | [`body`]        | `Body` (live arena entry), `BodySnapshot` (copy)      |
//! | [`wall`]        | `Wall` — the four sides of the container              |
//! | [`config`]      | `GasConfig`, `PopulationProfile`                      |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `BmError`, `BmResult`                                 |
//!
//! Vectors are glam's `DVec2`, re-exported as [`Vec2`].  The container spans
//! `[0, width] × [0, height]` with `y` growing downwards, so `TOP` is `y = 0`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and snapshot types. |

pub mod body;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod wall;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use body::{Body, BodySnapshot};
pub use config::{GasConfig, PopulationProfile, LIGHT_SPEED_SCALE};
pub use error::{BmError, BmResult};
pub use glam::DVec2 as Vec2;
pub use ids::BodyId;
pub use rng::SimRng;
pub use wall::Wall;
