//! `bm-sim` — the collision-driven event loop.
//!
//! # One event per step
//!
//! ```text
//! step():
//!   ① Pop         — earliest live event from the EventQueue.
//!   ② Resolve     — wall: flip the normal velocity component;
//!                   particle: elastic exchange along the contact normal.
//!   ③ Invalidate  — every pending event naming a participant goes dead.
//!   ④ Re-predict  — one wall event + every finite pair event per participant
//!                   (pair predictions on Rayon with the `parallel` feature).
//!   → SimDiff { time, cause, bodies }
//! ```
//!
//! Time is continuous: the engine clock jumps straight from one collision to
//! the next, and bodies between collisions are described by their leg
//! (`reference_position + velocity · (t − reference_time)`).
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Computes pair predictions on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bm_core::GasConfig;
//! use bm_sim::{Engine, NoopObserver};
//!
//! let mut engine = Engine::new(&GasConfig::default())?;
//! engine.run_events(10_000, &mut NoopObserver)?;
//! println!("t = {}, E = {}", engine.now(), engine.kinetic_energy());
//! ```

pub mod builder;
pub mod diff;
pub mod engine;
pub mod error;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use diff::SimDiff;
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
