//! Durable clock style storage

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ClockStyle;

/// On-disk layout: a single key holding the style's symbolic name.
#[derive(Debug, Serialize, Deserialize)]
struct StyleFile {
    clock_style: String,
}

/// File-backed store for the selected clock style.
///
/// Reads fall back to [`ClockStyle::Digital`] whenever the file is missing,
/// unreadable, unparsable, or names an unknown style. Writes are
/// fire-and-forget: failures are logged and never surfaced to callers.
#[derive(Debug, Clone)]
pub struct StyleStore {
    path: PathBuf,
}

impl StyleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the stored style, or the default when nothing valid is stored.
    pub fn get(&self) -> ClockStyle {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No stored style at {}: {}", self.path.display(), e);
                return ClockStyle::default();
            }
        };

        let file: StyleFile = match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    "Corrupt style file at {}, falling back to default: {}",
                    self.path.display(),
                    e
                );
                return ClockStyle::default();
            }
        };

        match ClockStyle::from_name(&file.clock_style) {
            Some(style) => style,
            None => {
                warn!(
                    "Unknown stored style '{}', falling back to default",
                    file.clock_style
                );
                ClockStyle::default()
            }
        }
    }

    /// Persist the style. Failures are logged, not returned.
    pub fn set(&self, style: ClockStyle) {
        let file = StyleFile {
            clock_style: style.as_str().to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create style directory {}: {}", parent.display(), e);
                return;
            }
        }

        match serde_json::to_string_pretty(&file) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("Failed to persist style to {}: {}", self.path.display(), e);
                } else {
                    debug!("Persisted style {} to {}", style.as_str(), self.path.display());
                }
            }
            Err(e) => warn!("Failed to serialize style: {}", e),
        }
    }
}
