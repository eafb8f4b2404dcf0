//! `bm-collision` — pure collision geometry for the hard-disc gas.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`predict`]  | `time_to_collide`, `time_to_hit_wall`, `WallHit`        |
//! | [`resolve`]  | `resolve_particles`, `resolve_wall`                     |
//!
//! Prediction never fails: anything that cannot happen (parallel motion,
//! separating bodies, a body at rest) comes back as `f64::INFINITY` or
//! `None`, never as NaN.  Resolution mutates bodies in place and always
//! moves them to the collision instant before touching their velocity.

pub mod predict;
pub mod resolve;


pub use predict::{WallHit, time_to_collide, time_to_hit_wall};
pub use resolve::{resolve_particles, resolve_wall};
