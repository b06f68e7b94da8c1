//! Power triggers and battery probing
//!
//! This module contains the external trigger events that drive session
//! lifecycle and the battery reading used by the render loop.

pub mod battery;
pub mod events;

// Re-export main types
pub use battery::{BatteryProbe, BatteryReading, SysfsBatteryProbe};
pub use events::PowerEvent;
