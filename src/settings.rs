//! Runtime configuration
//!
//! Defaults reproduce the reference hardware setup. Settings can be overridden
//! from a JSON file; missing fields keep their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::collision::Tones;

/// When a physics update asks the foreground to redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedrawPolicy {
    /// Only while at least one switch is held
    #[default]
    OnInput,
    /// After every physics update
    EveryUpdate,
}

impl RedrawPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedrawPolicy::OnInput => "on_input",
            RedrawPolicy::EveryUpdate => "every_update",
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Periodic tick rate (Hz)
    pub tick_hz: u32,
    /// Ticks per physics update
    pub tick_divisor: u32,
    pub redraw_policy: RedrawPolicy,

    // === Rules ===
    /// Score that ends a round
    pub win_score: u8,
    /// Frames the victory message stays up
    pub victory_frames: u32,
    /// Paddle speed while a switch is held
    pub paddle_speed: i32,

    // === Audio ===
    pub left_tone_hz: u32,
    pub right_tone_hz: u32,

    // === Demo runtime ===
    /// Seed for the demo switch driver
    pub seed: u64,
    /// Stop after this many rendered frames (run forever when unset)
    pub max_frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: TICK_HZ,
            tick_divisor: TICK_DIVISOR,
            redraw_policy: RedrawPolicy::OnInput,

            win_score: WIN_SCORE,
            victory_frames: VICTORY_FRAMES,
            paddle_speed: PADDLE_SPEED,

            left_tone_hz: LEFT_TONE_HZ,
            right_tone_hz: RIGHT_TONE_HZ,

            seed: 0x5eed,
            max_frames: None,
        }
    }
}

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
            SettingsError::Invalid(what) => write!(f, "invalid settings: {}", what),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
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

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from `path`, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
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
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_hz == 0 {
            return Err(SettingsError::Invalid("tick_hz must be positive"));
        }
        if self.tick_divisor == 0 {
            return Err(SettingsError::Invalid("tick_divisor must be positive"));
        }
        if self.win_score == 0 {
            return Err(SettingsError::Invalid("win_score must be positive"));
        }
        Ok(())
    }

    /// Tone frequencies for paddle hits
    pub fn tones(&self) -> Tones {
        Tones {
            left_hz: self.left_tone_hz,
            right_hz: self.right_tone_hz,
        }
    }

    /// Wall-clock period of one tick
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.tick_hz.max(1)
    }
}
