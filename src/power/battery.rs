//! Battery status probing

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

/// A single battery observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatteryReading {
    /// Charge percentage, if a battery was found and readable.
    pub percent: Option<u8>,
    pub charging: bool,
}

impl BatteryReading {
    pub fn unavailable() -> Self {
        Self {
            percent: None,
            charging: false,
        }
    }

    /// Human-readable status line for the standby display.
    pub fn display_text(&self) -> String {
        match self.percent {
            Some(percent) => {
                let status = if self.charging { "Charging" } else { "Not Charging" };
                format!("{} — {}%", status, percent)
            }
            None => "Battery info unavailable".to_string(),
        }
    }
}

/// Source of battery readings, injected into the display session.
///
/// Reads must be fast, synchronous, and non-blocking; they run inside the
/// render tick.
pub trait BatteryProbe: Send + Sync {
    fn read(&self) -> BatteryReading;
}

/// Battery probe backed by the Linux power-supply sysfs tree.
///
/// Scans `<root>` for the first supply exposing a `capacity` file and reads
/// its `capacity` and `status`. Any failure degrades to an unavailable
/// reading; the render loop never stops over battery trouble.
#[derive(Debug, Clone)]
pub struct SysfsBatteryProbe {
    root: PathBuf,
}

impl SysfsBatteryProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_supply(&self) -> Option<BatteryReading> {
        let entries = fs::read_dir(&self.root).ok()?;
        for entry in entries.flatten() {
            let capacity_path = entry.path().join("capacity");
            let Ok(capacity_raw) = fs::read_to_string(&capacity_path) else {
                continue;
            };
            let Ok(percent) = capacity_raw.trim().parse::<u8>() else {
                debug!("Unparsable capacity in {}", capacity_path.display());
                continue;
            };

            let charging = fs::read_to_string(entry.path().join("status"))
                .map(|s| matches!(s.trim(), "Charging" | "Full"))
                .unwrap_or(false);

            return Some(BatteryReading {
                percent: Some(percent.min(100)),
                charging,
            });
        }
        None
    }
}

impl Default for SysfsBatteryProbe {
    fn default() -> Self {
        Self::new("/sys/class/power_supply")
    }
}

impl BatteryProbe for SysfsBatteryProbe {
    fn read(&self) -> BatteryReading {
        match self.read_supply() {
            Some(reading) => reading,
            None => {
                debug!("No readable battery under {}", self.root.display());
                BatteryReading::unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_supply(root: &std::path::Path, name: &str, capacity: &str, status: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("capacity"), capacity).unwrap();
        fs::write(dir.join("status"), status).unwrap();
    }

    #[test]
    fn reads_capacity_and_charging_status() {
        let dir = tempdir().unwrap();
        write_supply(dir.path(), "BAT0", "85\n", "Charging\n");

        let probe = SysfsBatteryProbe::new(dir.path());
        let reading = probe.read();
        assert_eq!(reading.percent, Some(85));
        assert!(reading.charging);
        assert_eq!(reading.display_text(), "Charging — 85%");
    }

    #[test]
    fn full_counts_as_charging() {
        let dir = tempdir().unwrap();
        write_supply(dir.path(), "BAT0", "100", "Full");

        let reading = SysfsBatteryProbe::new(dir.path()).read();
        assert_eq!(reading.percent, Some(100));
        assert!(reading.charging);
    }

    #[test]
    fn discharging_renders_not_charging() {
        let dir = tempdir().unwrap();
        write_supply(dir.path(), "BAT0", "42", "Discharging");

        let reading = SysfsBatteryProbe::new(dir.path()).read();
        assert!(!reading.charging);
        assert_eq!(reading.display_text(), "Not Charging — 42%");
    }

    #[test]
    fn missing_tree_degrades_to_unavailable() {
        let probe = SysfsBatteryProbe::new("/definitely/not/a/real/path");
        let reading = probe.read();
        assert_eq!(reading, BatteryReading::unavailable());
        assert_eq!(reading.display_text(), "Battery info unavailable");
    }
}
