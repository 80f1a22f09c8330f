//! Data models for colors and channels.
//!
//! Models are independent of UI and state management.

pub mod rgb;

pub use rgb::{HexCase, RgbChannel, RgbColor};
