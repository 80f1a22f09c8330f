//! Canonical color store.
//!
//! Holds the committed color together with the hex field text and keeps the
//! two in sync in both directions. Each direction compares before writing so
//! a hex edit never echoes back into the field and a color change never
//! re-applies itself through the hex path.

use tracing::debug;

use crate::models::rgb::{is_strict_hex, parse_channel_input, HexCase};
use crate::models::{RgbChannel, RgbColor};

/// Committed color plus the (possibly half-typed) hex field text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorStore {
    color: RgbColor,
    hex_text: String,
    hex_case: HexCase,
}

impl ColorStore {
    /// Create a store holding `color`, with the hex text already encoded.
    #[must_use]
    pub fn new(color: RgbColor, hex_case: HexCase) -> Self {
        Self {
            color,
            hex_text: color.to_hex_with_case(hex_case),
            hex_case,
        }
    }

    /// The committed color.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.color
    }

    /// The hex field text exactly as it should be displayed.
    #[must_use]
    pub fn hex_text(&self) -> &str {
        &self.hex_text
    }

    /// Display case used when encoding.
    #[must_use]
    pub const fn hex_case(&self) -> HexCase {
        self.hex_case
    }

    /// Set one channel from raw numeric-field text.
    ///
    /// Empty or non-numeric text becomes 0, out-of-range values are clamped.
    /// The hex text is re-encoded even when the clamped value is unchanged,
    /// so a numeric edit always replaces half-typed hex.
    /// Returns true if the color changed.
    pub fn set_channel(&mut self, channel: RgbChannel, raw: &str) -> bool {
        let value = parse_channel_input(raw);
        let changed = self.set_color(self.color.with_channel(channel, value));
        if !changed {
            self.sync_hex_from_color();
        }
        changed
    }

    /// Replace the whole color, then resync the hex text.
    ///
    /// Returns true if the color changed.
    pub fn set_color(&mut self, color: RgbColor) -> bool {
        if color == self.color {
            return false;
        }
        debug!(from = %self.color, to = %color, "color committed");
        self.color = color;
        self.sync_hex_from_color();
        true
    }

    /// Store hex field text verbatim and apply it if it is a complete color.
    ///
    /// Partial or malformed text is kept for display but never touches the
    /// color. Returns true if the color changed.
    pub fn set_hex_text(&mut self, raw: &str) -> bool {
        self.hex_text = raw.to_string();

        if !is_strict_hex(raw) {
            return false;
        }

        match RgbColor::from_hex(raw) {
            Ok(decoded) if decoded != self.color => {
                debug!(hex = raw, "hex text applied");
                self.color = decoded;
                // Text is already the encoding of the new color (modulo case)
                self.sync_hex_from_color();
                true
            }
            _ => false,
        }
    }

    /// Change the display case.
    ///
    /// A valid hex text for the current color is re-encoded in the new case;
    /// half-typed text is left alone.
    pub fn set_hex_case(&mut self, hex_case: HexCase) {
        self.hex_case = hex_case;
        if is_strict_hex(&self.hex_text) {
            self.hex_text = self.color.to_hex_with_case(hex_case);
        }
    }

    /// Recompute the hex text from the color, skipping the write when the
    /// current text already encodes it.
    fn sync_hex_from_color(&mut self) {
        let candidate = self.color.to_hex_with_case(self.hex_case);
        if !candidate.eq_ignore_ascii_case(&self.hex_text) {
            self.hex_text = candidate;
        }
    }
}

impl Default for ColorStore {
    fn default() -> Self {
        Self::new(RgbColor::default(), HexCase::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_hex() {
        let store = ColorStore::default();
        assert_eq!(store.color(), RgbColor::new(141, 182, 150));
        assert_eq!(store.hex_text(), "#8db696");
    }

    #[test]
    fn test_set_hex_text_applies_full_hex() {
        let mut store = ColorStore::default();
        assert!(store.set_hex_text("#FF0000"));
        assert_eq!(store.color(), RgbColor::new(255, 0, 0));
        // what the user typed stays as typed
        assert_eq!(store.hex_text(), "#FF0000");
    }

    #[test]
    fn test_set_hex_text_partial_is_kept_verbatim() {
        let mut store = ColorStore::default();
        assert!(!store.set_hex_text("#ff00"));
        assert_eq!(store.color(), RgbColor::new(141, 182, 150));
        assert_eq!(store.hex_text(), "#ff00");
    }

    #[test]
    fn test_set_hex_text_rejects_missing_hash_and_garbage() {
        let mut store = ColorStore::default();
        assert!(!store.set_hex_text("ff0000"));
        assert!(!store.set_hex_text("#zz0000"));
        assert!(!store.set_hex_text(""));
        assert_eq!(store.color(), RgbColor::new(141, 182, 150));
        assert_eq!(store.hex_text(), "");
    }

    #[test]
    fn test_set_hex_text_same_color_is_noop() {
        let mut store = ColorStore::default();
        let before = store.clone();
        assert!(!store.set_hex_text("#8db696"));
        assert_eq!(store, before);

        // different case, same color: no color change and no rewrite
        assert!(!store.set_hex_text("#8DB696"));
        assert_eq!(store.color(), before.color());
        assert_eq!(store.hex_text(), "#8DB696");
    }

    #[test]
    fn test_set_channel_clamps_and_resyncs() {
        let mut store = ColorStore::default();
        assert!(store.set_channel(RgbChannel::Red, "300"));
        assert_eq!(store.color(), RgbColor::new(255, 182, 150));
        assert_eq!(store.hex_text(), "#ffb696");
    }

    #[test]
    fn test_set_channel_empty_is_zero() {
        let mut store = ColorStore::default();
        assert!(store.set_channel(RgbChannel::Blue, ""));
        assert_eq!(store.color(), RgbColor::new(141, 182, 0));
        assert_eq!(store.hex_text(), "#8db600");
    }

    #[test]
    fn test_set_channel_only_touches_one_channel() {
        let mut store = ColorStore::default();
        store.set_channel(RgbChannel::Green, "7");
        assert_eq!(store.color().r, 141);
        assert_eq!(store.color().g, 7);
        assert_eq!(store.color().b, 150);
    }

    #[test]
    fn test_set_channel_unchanged_value_reports_false() {
        let mut store = ColorStore::default();
        assert!(!store.set_channel(RgbChannel::Red, "141"));
    }

    #[test]
    fn test_color_change_overwrites_partial_hex() {
        let mut store = ColorStore::default();
        store.set_hex_text("#12");
        store.set_channel(RgbChannel::Red, "0");
        assert_eq!(store.hex_text(), "#00b696");
    }

    #[test]
    fn test_numeric_edit_with_same_value_replaces_partial_hex() {
        let mut store = ColorStore::default();
        store.set_hex_text("#12");
        assert!(!store.set_channel(RgbChannel::Red, "141"));
        assert_eq!(store.hex_text(), "#8db696");

        // clamps back to the current value
        store.set_channel(RgbChannel::Red, "255");
        store.set_hex_text("#ff");
        assert!(!store.set_channel(RgbChannel::Red, "2550"));
        assert_eq!(store.hex_text(), "#ffb696");
    }

    #[test]
    fn test_set_hex_case() {
        let mut store = ColorStore::default();
        store.set_hex_case(HexCase::Upper);
        assert_eq!(store.hex_text(), "#8DB696");

        store.set_hex_text("#ab");
        store.set_hex_case(HexCase::Lower);
        assert_eq!(store.hex_text(), "#ab");

        store.set_channel(RgbChannel::Red, "255");
        assert_eq!(store.hex_text(), "#ffb696");
    }
}
