//! Screen-wake resource management
//!
//! This module contains the platform seam for "keep the display active"
//! requests and the scoped resource guard built on top of it.

pub mod platform;
pub mod resource;

// Re-export main types
pub use platform::{LogOnlyWakePlatform, WakePlatform};
pub use resource::{WakeResource, AMBIENT_MAX_HOLD, TIMER_MAX_HOLD};
