//! Periodic tick scheduling
//!
//! This module contains the repeating, cancellable tick primitive that the
//! display session and the countdown engine are built on.

pub mod ticker;

// Re-export main types
pub use ticker::{TickControl, TickScheduler, TICK_PERIOD};
