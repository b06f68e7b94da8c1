//! API response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::{CountdownSnapshot, RenderFrame};
use crate::style::ClockStyle;

/// API response structure for trigger and timer endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session_active: bool,
    pub countdown: CountdownSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(
        status: String,
        message: String,
        session_active: bool,
        countdown: CountdownSnapshot,
    ) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session_active,
            countdown,
        }
    }

    /// Create an accepted response
    pub fn accepted(message: String, session_active: bool, countdown: CountdownSnapshot) -> Self {
        Self::new("accepted".to_string(), message, session_active, countdown)
    }

    /// Create an error response
    pub fn error(message: String, session_active: bool, countdown: CountdownSnapshot) -> Self {
        Self::new("error".to_string(), message, session_active, countdown)
    }
}

/// Enhanced status response with session, countdown, and render information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub session_active: bool,
    pub countdown: CountdownSnapshot,
    pub countdown_display: Option<String>,
    pub timer_wake_held: bool,
    /// Seconds until the platform may reclaim the timer wake, when held.
    pub timer_wake_expires_in_seconds: Option<u64>,
    pub style: ClockStyle,
    pub frame: Option<RenderFrame>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_trigger: Option<String>,
    pub last_trigger_time: Option<DateTime<Utc>>,
}

/// Style read/update response
#[derive(Debug, Clone, Serialize)]
pub struct StyleResponse {
    pub style: ClockStyle,
    pub available: Vec<&'static str>,
}

impl StyleResponse {
    pub fn new(style: ClockStyle) -> Self {
        Self {
            style,
            available: ClockStyle::ALL.iter().map(|s| s.as_str()).collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Format remaining seconds as H:MM:SS, or M:SS below an hour.
///
/// Display-layer concern: the countdown engine itself only emits integers.
pub fn format_remaining(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
