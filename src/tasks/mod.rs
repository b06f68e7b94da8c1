//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_monitor;
pub mod supervisor;

// Re-export main functions
pub use countdown_monitor::countdown_monitor_task;
pub use supervisor::power_supervisor_task;
