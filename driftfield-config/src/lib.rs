use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

// --- Error Type ---
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// --- Defaults ---
pub const DEFAULT_COUNT: u32 = 150;
pub const DEFAULT_SIZE: f64 = 2.0;
pub const DEFAULT_MIN_SPEED: f64 = 10.0;
pub const DEFAULT_MAX_SPEED: f64 = 50.0;
pub const DEFAULT_FILL_STYLE: &str = "rgba(255,255,255,1)";

// --- Configuration Sections ---

/// Optional point every generated particle starts from.
///
/// Each axis is independent: an unset axis is randomised within the viewport.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct StartOrigin {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl StartOrigin {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y) }
    }
}

// --- Top-Level Config Struct ---

/// Settings for a particle field, loaded once at startup.
///
/// Keys are camelCase on disk; every key is optional and falls back to the
/// built-in preset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub count: u32,
    pub size: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub start_origin: StartOrigin,
    pub fill_style: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            start_origin: StartOrigin::default(),
            fill_style: DEFAULT_FILL_STYLE.to_string(),
        }
    }
}

impl FieldConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Negative sizes would fail particle construction later on
        check_non_negative("size", self.size)?;
        check_non_negative("minSpeed", self.min_speed)?;
        check_non_negative("maxSpeed", self.max_speed)?;

        for (name, value) in [("startOrigin.x", self.start_origin.x), ("startOrigin.y", self.start_origin.y)] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ConfigError::ValidationError(format!("{} must be finite", name)));
                }
            }
        }

        if self.fill_style.trim().is_empty() {
            return Err(ConfigError::ValidationError("fillStyle cannot be empty".to_string()));
        }

        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "{} must be a finite, non-negative number (got {})",
            name, value
        )));
    }
    Ok(())
}

// --- Loading Function ---

pub fn load_config(path: &Path) -> Result<FieldConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    FieldConfig::from_json_str(&content)
}
