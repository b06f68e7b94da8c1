//! Standby session orchestration
//!
//! This module contains the display session (ambient clock) and the countdown
//! engine, both layered on the tick scheduler.

pub mod countdown;
pub mod display;

// Re-export main types
pub use countdown::{CountdownEngine, CountdownEvent, CountdownPhase, CountdownSnapshot};
pub use display::{DisplaySession, RenderFrame};
