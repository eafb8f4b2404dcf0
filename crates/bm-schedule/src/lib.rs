//! `bm-schedule` — collision events and the event queue.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`event`]       | `Event`, `EventKind`                                   |
//! | [`event_queue`] | `EventQueue` (binary heap + lazy `live` flags)         |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                   |
//!
//! # Invalidation model (summary)
//!
//! ```text
//! collision at t involving body X
//!   → invalidate_all(X)      every pending event naming X goes dead
//!   → push fresh predictions for X, scheduled_at = t
//! pop_next_live()            skips dead entries as they surface
//! ```
//!
//! The queue never looks at bodies; the engine decides what to invalidate.

pub mod error;
pub mod event;
pub mod event_queue;


pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind};
pub use event_queue::EventQueue;
