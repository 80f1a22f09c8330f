//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and file locations.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "RgbHex";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "rgbhex";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "RgbHex";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "RGBHEX_CONFIG_DIR";

/// Default log file name inside the config directory.
pub const LOG_FILE_NAME: &str = "rgbhex.log";

/// Maximum length of the hex field (`#` plus six digits).
pub const HEX_INPUT_MAX_LEN: usize = 7;

/// Maximum length of a numeric channel field.
pub const CHANNEL_INPUT_MAX_LEN: usize = 4;
