//! Game settings and preferences
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_SMOOTHING, DEFAULT_ZOOM, PLAYER_SPEED};
use crate::sim::camera::FollowMode;

/// Errors from reading or writing a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the game cannot run with
    Invalid {
        field: &'static str,
        value: f32,
    },
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Invalid { field, value } => {
                write!(f, "Invalid setting: {} = {}", field, value)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Output surface width in pixels
    pub viewport_width: f32,
    /// Output surface height in pixels
    pub viewport_height: f32,
    /// Initial camera zoom
    pub zoom: f32,

    // === Camera ===
    pub follow_mode: FollowMode,
    /// Fraction of remaining distance covered per frame in smooth mode
    pub camera_smoothing: f32,

    // === Gameplay ===
    /// Player speed in pixels per second
    pub player_speed: f32,
    /// Level to start on (1-based)
    pub start_level: u32,
    /// Run seed
    pub seed: u64,
    /// Start on the fixed 30x30 test map instead of a generated level
    pub test_map: bool,

    // === Debug ===
    pub debug_immortal: bool,
    pub debug_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            zoom: DEFAULT_ZOOM,

            follow_mode: FollowMode::Immediate,
            camera_smoothing: CAMERA_SMOOTHING,

            player_speed: PLAYER_SPEED,
            start_level: 1,
            seed: 12345,
            test_map: false,

            debug_immortal: false,
            debug_overlay: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check numeric fields: viewport edges must be finite and positive, the
    /// zoom and smoothing finite, the player speed finite and not negative
    pub fn validate(&self) -> Result<(), SettingsError> {
        let checks = [
            ("viewport_width", self.viewport_width, self.viewport_width > 0.0),
            ("viewport_height", self.viewport_height, self.viewport_height > 0.0),
            ("zoom", self.zoom, true),
            ("camera_smoothing", self.camera_smoothing, true),
            ("player_speed", self.player_speed, self.player_speed >= 0.0),
        ];
        for (field, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(SettingsError::Invalid { field, value });
            }
        }
        Ok(())
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Could not load {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
