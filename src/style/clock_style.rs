//! Clock style enumeration

use serde::{Deserialize, Serialize};

/// The set of selectable clock faces. Persisted by symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockStyle {
    Digital,
    Bold,
    BoldSquare,
    BoldCondensed,
    Neon,
    Minimal,
    Outlined,
    Retro,
}

impl ClockStyle {
    /// All styles, in presentation order.
    pub const ALL: [ClockStyle; 8] = [
        ClockStyle::Digital,
        ClockStyle::Bold,
        ClockStyle::BoldSquare,
        ClockStyle::BoldCondensed,
        ClockStyle::Neon,
        ClockStyle::Minimal,
        ClockStyle::Outlined,
        ClockStyle::Retro,
    ];

    /// The symbolic name used for persistence and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockStyle::Digital => "DIGITAL",
            ClockStyle::Bold => "BOLD",
            ClockStyle::BoldSquare => "BOLD_SQUARE",
            ClockStyle::BoldCondensed => "BOLD_CONDENSED",
            ClockStyle::Neon => "NEON",
            ClockStyle::Minimal => "MINIMAL",
            ClockStyle::Outlined => "OUTLINED",
            ClockStyle::Retro => "RETRO",
        }
    }

    /// Look up a style by its symbolic name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        ClockStyle::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl Default for ClockStyle {
    fn default() -> Self {
        ClockStyle::Digital
    }
}
