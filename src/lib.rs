//! Dockwatch - a state-managed daemon for an always-on standby display
//!
//! While a device sits docked and charging, dockwatch runs a standby display
//! session: a 1-second render tick that refreshes clock, date, battery, and
//! theme state, paired with a screen-wake resource whose lifetime is bound to
//! the tick's. A countdown timer state machine rides the same scheduler.
//! Power connect/disconnect triggers arrive over a small HTTP surface and
//! drive the session lifecycle.

pub mod api;
pub mod config;
pub mod power;
pub mod sched;
pub mod session;
pub mod state;
pub mod style;
pub mod tasks;
pub mod utils;
pub mod wake;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
