//! Service layer for the converter's state and rules.
//!
//! This module contains the host-independent state machine that keeps the
//! RGB fields, the sliders and the hex field consistent.

pub mod color_store;
pub mod converter;
pub mod copy_status;
pub mod slider;

// Re-export commonly used types
pub use color_store::ColorStore;
pub use converter::{ColorConverter, ConverterOptions, ConverterSnapshot};
pub use copy_status::{ClipboardWriter, CopyStatus};
pub use slider::{CommitPolicy, CommitPolicyKind, DebounceTimer, SliderStaging};
