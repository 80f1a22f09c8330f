//! RgbHex Library
//!
//! This library provides the RGB/hex color converter: the color models, the
//! host-independent state manager that keeps numeric fields, sliders and hex
//! text in sync, configuration, and the terminal host built on top of them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod tui;
