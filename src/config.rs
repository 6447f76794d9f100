use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

use crate::models::SwipeTuning;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiSettings,
    #[serde(default)]
    #[validate(nested)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    #[validate(url)]
    pub base_url: String,
    /// Session cookie attached to every request; login happens elsewhere
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:7777".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

/// Gesture and animation tuning
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GestureSettings {
    #[serde(default = "default_swipe_threshold")]
    #[validate(range(min = 1.0))]
    pub swipe_threshold: f32,
    #[serde(default = "default_velocity_threshold")]
    #[validate(range(min = 0.01))]
    pub velocity_threshold: f32,
    #[serde(default = "default_vertical_damping")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub vertical_damping: f32,
    #[serde(default = "default_rotation_factor")]
    #[validate(range(min = 0.0))]
    pub rotation_factor: f32,
    #[serde(default = "default_viewport_width")]
    #[validate(range(min = 1.0))]
    pub viewport_width: f32,
    #[serde(default = "default_fly_duration_ms")]
    #[validate(range(min = 1))]
    pub fly_duration_ms: u64,
    #[serde(default = "default_settle_duration_ms")]
    #[validate(range(min = 1))]
    pub settle_duration_ms: u64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            velocity_threshold: default_velocity_threshold(),
            vertical_damping: default_vertical_damping(),
            rotation_factor: default_rotation_factor(),
            viewport_width: default_viewport_width(),
            fly_duration_ms: default_fly_duration_ms(),
            settle_duration_ms: default_settle_duration_ms(),
        }
    }
}

impl GestureSettings {
    /// Convert into the tuning struct the engine consumes
    pub fn into_tuning(self) -> SwipeTuning {
        SwipeTuning {
            swipe_threshold: self.swipe_threshold,
            velocity_threshold: self.velocity_threshold,
            vertical_damping: self.vertical_damping,
            rotation_factor: self.rotation_factor,
            viewport_width: self.viewport_width,
            fly_duration_ms: self.fly_duration_ms,
            settle_duration_ms: self.settle_duration_ms,
        }
    }
}

fn default_swipe_threshold() -> f32 {
    120.0
}
fn default_velocity_threshold() -> f32 {
    0.5
}
fn default_vertical_damping() -> f32 {
    0.4
}
fn default_rotation_factor() -> f32 {
    0.1
}
fn default_viewport_width() -> f32 {
    480.0
}
fn default_fly_duration_ms() -> u64 {
    350
}
fn default_settle_duration_ms() -> u64 {
    400
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with DEVDECK_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DEVDECK_GESTURE__SWIPE_THRESHOLD -> gesture.swipe_threshold
            .add_source(
                Environment::with_prefix("DEVDECK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DEVDECK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gesture_settings() {
        let gesture = GestureSettings::default();
        assert_eq!(gesture.swipe_threshold, 120.0);
        assert_eq!(gesture.velocity_threshold, 0.5);
        assert_eq!(gesture.vertical_damping, 0.4);
        assert_eq!(gesture.rotation_factor, 0.1);
        assert_eq!(gesture.fly_duration_ms, 350);
    }

    #[test]
    fn test_tuning_conversion() {
        let tuning = GestureSettings::default().into_tuning();
        assert_eq!(tuning.swipe_threshold, 120.0);
        assert_eq!(tuning.settle_duration_ms, 400);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_invalid_damping_rejected() {
        let gesture = GestureSettings {
            vertical_damping: 1.5,
            ..GestureSettings::default()
        };
        assert!(gesture.validate().is_err());
    }
}
