//! CLI command handlers for RgbHex.
//!
//! This module provides headless, scriptable access to the converter and its
//! configuration for automation and testing.

pub mod common;
pub mod config;
pub mod convert;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use convert::ConvertArgs;
