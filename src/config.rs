//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::models::rgb::HexCase;
use crate::models::RgbColor;
use crate::services::{CommitPolicyKind, ConverterOptions};

/// Largest accepted debounce delay.
pub const MAX_DEBOUNCE_MS: u64 = 1000;

/// Largest accepted copy feedback window.
pub const MAX_COPY_FEEDBACK_MS: u64 = 60_000;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl std::str::FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => anyhow::bail!("Invalid theme mode. Must be 'auto', 'light', or 'dark'"),
        }
    }
}

/// Converter behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Color shown at startup ("#RRGGBB", leading '#' optional)
    #[serde(default = "default_initial_color")]
    pub initial_color: String,
    /// When slider drags are committed
    #[serde(default)]
    pub commit_policy: CommitPolicyKind,
    /// Debounce quiet period in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Hex display case
    #[serde(default)]
    pub hex_case: HexCase,
    /// How long "Copied!" stays visible, in milliseconds
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,
}

fn default_initial_color() -> String {
    RgbColor::default().to_hex_with_case(HexCase::Lower)
}

const fn default_debounce_ms() -> u64 {
    20
}

const fn default_copy_feedback_ms() -> u64 {
    2000
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            initial_color: default_initial_color(),
            commit_policy: CommitPolicyKind::default(),
            debounce_ms: default_debounce_ms(),
            hex_case: HexCase::default(),
            copy_feedback_ms: default_copy_feedback_ms(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Show the key help line at the bottom of the form
    #[serde(default = "default_show_help")]
    pub show_help: bool,
}

const fn default_show_help() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            show_help: default_show_help(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/RgbHex/config.toml`
/// - macOS: `~/Library/Application Support/RgbHex/config.toml`
/// - Windows: `%APPDATA%\RgbHex\config.toml`
///
/// `RGBHEX_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `initial_color` must be six hex digits
/// - `debounce_ms` must not exceed 1000
/// - `copy_feedback_ms` must be between 1 and 60000
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Converter behavior
    #[serde(default)]
    pub converter: ConverterConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        Self::from_toml(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        RgbColor::from_hex(&self.converter.initial_color).context(format!(
            "Invalid initial_color '{}'",
            self.converter.initial_color
        ))?;

        if self.converter.debounce_ms > MAX_DEBOUNCE_MS {
            anyhow::bail!(
                "debounce_ms must be at most {MAX_DEBOUNCE_MS}, got {}",
                self.converter.debounce_ms
            );
        }

        if self.converter.copy_feedback_ms == 0
            || self.converter.copy_feedback_ms > MAX_COPY_FEEDBACK_MS
        {
            anyhow::bail!(
                "copy_feedback_ms must be between 1 and {MAX_COPY_FEEDBACK_MS}, got {}",
                self.converter.copy_feedback_ms
            );
        }

        Ok(())
    }

    /// Builds state manager options from this configuration.
    pub fn converter_options(&self) -> Result<ConverterOptions> {
        let initial_color = RgbColor::from_hex(&self.converter.initial_color)?;
        Ok(ConverterOptions {
            initial_color,
            commit_policy: self
                .converter
                .commit_policy
                .with_delay_ms(self.converter.debounce_ms),
            hex_case: self.converter.hex_case,
            copy_feedback: Duration::from_millis(self.converter.copy_feedback_ms),
        })
    }
}
