//! Power trigger events

/// External power events forwarded into the supervisor.
///
/// Connected starts a fresh standby session (superseding any prior one),
/// Disconnected tears the current one down, and BootCompleted is
/// informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEvent {
    Connected,
    Disconnected,
    BootCompleted,
}

impl PowerEvent {
    /// Short name used for trigger tracking and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerEvent::Connected => "power-connected",
            PowerEvent::Disconnected => "power-disconnected",
            PowerEvent::BootCompleted => "boot-completed",
        }
    }
}
