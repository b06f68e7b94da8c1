//! Configuration and CLI argument handling

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "dockwatch")]
#[command(about = "A state-managed daemon for an always-on standby display")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20710")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Path to the persisted clock style file
    #[arg(long)]
    pub style_file: Option<PathBuf>,

    /// Maximum screen-wake hold for ambient sessions, in minutes
    #[arg(long, default_value = "10")]
    pub ambient_hold_minutes: u64,

    /// Maximum screen-wake hold for countdown sessions, in hours
    #[arg(long, default_value = "24")]
    pub timer_hold_hours: u64,

    /// Root of the power-supply sysfs tree used for battery readings
    #[arg(long, default_value = "/sys/class/power_supply")]
    pub battery_root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Resolve the style file path, defaulting under the user config dir.
    pub fn style_file(&self) -> PathBuf {
        match &self.style_file {
            Some(path) => path.clone(),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("dockwatch")
                .join("style.json"),
        }
    }

    pub fn ambient_hold(&self) -> Duration {
        Duration::from_secs(self.ambient_hold_minutes * 60)
    }

    pub fn timer_hold(&self) -> Duration {
        Duration::from_secs(self.timer_hold_hours * 60 * 60)
    }
}
