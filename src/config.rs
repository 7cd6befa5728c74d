//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::booking::calendar::{parse_picker_date, Clock, FixedClock, SystemClock};
use crate::directory::{DirectoryError, StaticDirectory};
use crate::events::BusConfig;
use crate::widgets::AccordionMode;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub booking: BookingConfig,

    #[serde(default)]
    pub timers: TimersConfig,

    #[serde(default)]
    pub widgets: WidgetsConfig,

    #[serde(default)]
    pub events: EventsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Appointment booking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Pin "today" instead of reading the system clock
    #[serde(default)]
    pub today: Option<NaiveDate>,

    #[serde(default = "default_disable_weekends")]
    pub disable_weekends: bool,

    /// TOML doctor directory replacing the built-in table
    #[serde(default)]
    pub directory_path: Option<PathBuf>,
}

fn default_disable_weekends() -> bool {
    true
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            today: None,
            disable_weekends: default_disable_weekends(),
            directory_path: None,
        }
    }
}

impl BookingConfig {
    pub fn clock(&self) -> Rc<dyn Clock> {
        match self.today {
            Some(date) => Rc::new(FixedClock(date)),
            None => Rc::new(SystemClock),
        }
    }

    /// Configured directory file, or the built-in table
    pub fn directory(&self) -> Result<StaticDirectory, DirectoryError> {
        match &self.directory_path {
            Some(path) => StaticDirectory::load(path),
            None => Ok(StaticDirectory::builtin()),
        }
    }
}

/// Timer delays, in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct TimersConfig {
    /// Auto-dismiss delay for transient success modals
    #[serde(default = "default_auto_dismiss")]
    pub auto_dismiss_ms: u64,

    /// Auto-dismiss for the appointment confirmation; unset keeps it open
    #[serde(default)]
    pub confirmation_auto_dismiss_ms: Option<u64>,

    #[serde(default = "default_slider_interval")]
    pub slider_interval_ms: u64,

    #[serde(default = "default_feedback_delay")]
    pub feedback_submit_delay_ms: u64,
}

fn default_auto_dismiss() -> u64 {
    5000 // 5 seconds
}

fn default_slider_interval() -> u64 {
    5000 // 5 seconds
}

fn default_feedback_delay() -> u64 {
    1000
}

impl Default for TimersConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: default_auto_dismiss(),
            confirmation_auto_dismiss_ms: None,
            slider_interval_ms: default_slider_interval(),
            feedback_submit_delay_ms: default_feedback_delay(),
        }
    }
}

impl TimersConfig {
    pub fn auto_dismiss(&self) -> Duration {
        Duration::from_millis(self.auto_dismiss_ms)
    }

    pub fn confirmation_auto_dismiss(&self) -> Option<Duration> {
        self.confirmation_auto_dismiss_ms.map(Duration::from_millis)
    }

    pub fn slider_interval(&self) -> Duration {
        Duration::from_millis(self.slider_interval_ms)
    }

    pub fn feedback_submit_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_submit_delay_ms)
    }
}

/// Widget behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetsConfig {
    /// Opening one accordion item closes the others
    #[serde(default)]
    pub exclusive_accordion: bool,

    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: u32,

    /// Viewport width assumed until the host reports a resize
    #[serde(default = "default_viewport_width")]
    pub initial_viewport_px: u32,
}

fn default_mobile_breakpoint() -> u32 {
    768
}

fn default_viewport_width() -> u32 {
    1280
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            exclusive_accordion: false,
            mobile_breakpoint_px: default_mobile_breakpoint(),
            initial_viewport_px: default_viewport_width(),
        }
    }
}

impl WidgetsConfig {
    pub fn accordion_mode(&self) -> AccordionMode {
        if self.exclusive_accordion {
            AccordionMode::Exclusive
        } else {
            AccordionMode::Independent
        }
    }
}

/// Event bus configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_max_cascade")]
    pub max_cascade: usize,
}

fn default_max_cascade() -> usize {
    64
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            max_cascade: default_max_cascade(),
        }
    }
}

impl EventsConfig {
    pub fn bus_config(&self) -> BusConfig {
        BusConfig {
            max_cascade: self.max_cascade,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("medibook").join("config.toml")),
            Some(PathBuf::from("/etc/medibook/config.toml")),
            Some(PathBuf::from("./medibook.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Booking overrides
        if let Some(today) = var("MEDIBOOK_TODAY") {
            match parse_picker_date(&today) {
                Ok(date) => self.booking.today = Some(date),
                Err(e) => tracing::warn!("Ignoring MEDIBOOK_TODAY: {}", e),
            }
        }
        if let Some(path) = var("MEDIBOOK_DIRECTORY") {
            self.booking.directory_path = Some(PathBuf::from(path));
        }

        // Timer overrides
        if let Some(interval) = var("MEDIBOOK_SLIDER_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.timers.slider_interval_ms = ms;
            }
        }

        // Logging overrides
        if let Some(level) = var("MEDIBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MEDIBOOK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# medibook Configuration
#
# Environment variables override these settings:
# - MEDIBOOK_TODAY
# - MEDIBOOK_DIRECTORY
# - MEDIBOOK_SLIDER_INTERVAL_MS
# - MEDIBOOK_LOG_LEVEL
# - MEDIBOOK_LOG_FORMAT

[booking]
# Pin the date used for the past-date rule (defaults to the local date)
# today = "2025-03-03"

# Refuse Saturday and Sunday appointments
disable_weekends = true

# Optional TOML doctor directory replacing the built-in table
# directory_path = "/etc/medibook/directory.toml"

[timers]
# Auto-dismiss delay for success modals (ms)
auto_dismiss_ms = 5000

# Auto-dismiss the appointment confirmation (ms); unset keeps it open
# confirmation_auto_dismiss_ms = 8000

# Testimonial slider auto-advance interval (ms)
slider_interval_ms = 5000

# Simulated feedback submission delay (ms)
feedback_submit_delay_ms = 1000

[widgets]
# Only one accordion item open at a time
exclusive_accordion = false

# Width at or below which the sidebar acts as a mobile drawer (px)
mobile_breakpoint_px = 768

# Viewport width assumed before the first resize (px)
initial_viewport_px = 1280

[events]
# Maximum events processed per dispatch, follow-ups included
max_cascade = 64

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.booking.disable_weekends);
        assert_eq!(config.timers.auto_dismiss(), Duration::from_millis(5000));
        assert_eq!(config.timers.slider_interval(), Duration::from_millis(5000));
        assert_eq!(config.timers.feedback_submit_delay(), Duration::from_millis(1000));
        assert_eq!(config.timers.confirmation_auto_dismiss(), None);
        assert_eq!(config.widgets.accordion_mode(), AccordionMode::Independent);
        assert_eq!(config.events.max_cascade, 64);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::from_toml_str(&generate_default_config()).unwrap();
        assert_eq!(config.widgets.mobile_breakpoint_px, 768);
        assert_eq!(config.timers.slider_interval_ms, 5000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str(
            r#"
            [booking]
            today = "2025-03-03"

            [widgets]
            exclusive_accordion = true
            "#,
        )
        .unwrap();
        assert_eq!(config.booking.today, NaiveDate::from_ymd_opt(2025, 3, 3));
        assert_eq!(
            config.booking.clock().today(),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
        );
        assert_eq!(config.widgets.accordion_mode(), AccordionMode::Exclusive);
        assert_eq!(config.timers.auto_dismiss_ms, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medibook.toml");
        std::fs::write(&path, "[events]\nmax_cascade = 8\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.events.bus_config().max_cascade, 8);

        std::fs::write(&path, "[events\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MEDIBOOK_TODAY", "2025-03-10"),
            ("MEDIBOOK_DIRECTORY", "/srv/directory.toml"),
            ("MEDIBOOK_SLIDER_INTERVAL_MS", "250"),
            ("MEDIBOOK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.booking.today, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(
            config.booking.directory_path,
            Some(PathBuf::from("/srv/directory.toml"))
        );
        assert_eq!(config.timers.slider_interval_ms, 250);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_bad_overrides_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "MEDIBOOK_TODAY" => Some("next tuesday".to_string()),
            "MEDIBOOK_SLIDER_INTERVAL_MS" => Some("fast".to_string()),
            _ => None,
        });
        assert_eq!(config.booking.today, None);
        assert_eq!(config.timers.slider_interval_ms, 5000);
    }

    #[test]
    fn test_directory_fallback() {
        let config = Config::default();
        assert_eq!(config.booking.directory().unwrap().doctor_count(), 13);
    }
}
