//! RGB color handling with hex parsing, serialization and channel sanitizing.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for channel clamping
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Strict hex pattern a hex field must match before it is applied to a color.
static STRICT_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("strict hex pattern is valid"));

/// Integer-looking text (used to saturate values that overflow `i64`).
static INTEGER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"));

/// Returns true if `text` is exactly `#` followed by six hex digits.
///
/// This is the gate between "the user is still typing" and "apply this to the color".
#[must_use]
pub fn is_strict_hex(text: &str) -> bool {
    STRICT_HEX.is_match(text)
}

/// Converts raw numeric-field text into a channel value.
///
/// - empty (or whitespace) text becomes 0
/// - integers are clamped to 0..=255, integers too large for `i64` saturate
/// - decimals are truncated toward zero, then clamped
/// - anything else (`abc`, `NaN`, `inf`) becomes 0
///
/// # Examples
///
/// ```
/// use rgbhex::models::rgb::parse_channel_input;
///
/// assert_eq!(parse_channel_input(""), 0);
/// assert_eq!(parse_channel_input("300"), 255);
/// assert_eq!(parse_channel_input("-4"), 0);
/// assert_eq!(parse_channel_input("12.7"), 12);
/// assert_eq!(parse_channel_input("abc"), 0);
/// ```
#[must_use]
pub fn parse_channel_input(raw: &str) -> u8 {
    let text = raw.trim();
    if text.is_empty() {
        return 0;
    }

    if let Ok(value) = text.parse::<i64>() {
        return clamp_channel(value);
    }

    if INTEGER_TEXT.is_match(text) {
        // Overflowed i64, so the magnitude alone decides
        return if text.starts_with('-') { 0 } else { u8::MAX };
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc().clamp(0.0, 255.0) as u8,
        _ => 0,
    }
}

/// Clamps an arbitrary integer into the 0..=255 channel range.
#[must_use]
pub fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, i64::from(u8::MAX)) as u8
}

/// Letter case used when encoding a color as hex text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexCase {
    /// `#8db696`
    #[default]
    Lower,
    /// `#8DB696`
    Upper,
}

impl FromStr for HexCase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lower" | "lowercase" => Ok(Self::Lower),
            "upper" | "uppercase" => Ok(Self::Upper),
            other => anyhow::bail!("Invalid hex case '{other}'. Must be 'lower' or 'upper'"),
        }
    }
}

impl fmt::Display for HexCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}

/// RGB channel being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RgbChannel {
    /// Red color channel
    Red,
    /// Green color channel
    Green,
    /// Blue color channel
    Blue,
}

impl RgbChannel {
    /// All channels in display order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }

    /// Next channel (Red -> Green -> Blue -> Red)
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Previous channel (Red -> Blue -> Green -> Red)
    #[must_use]
    pub const fn previous(&self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Green => Self::Red,
            Self::Blue => Self::Green,
        }
    }
}

impl FromStr for RgbChannel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "g" | "green" => Ok(Self::Green),
            "b" | "blue" => Ok(Self::Blue),
            other => anyhow::bail!("Unknown channel '{other}'. Expected r, g or b"),
        }
    }
}

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Supports parsing from hex strings (#RRGGBB) and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbhex::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("8db696").unwrap();
    /// assert_eq!(color, RgbColor::new(141, 182, 150));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not exactly six hex digits after
    /// an optional leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Parses a comma separated `R,G,B` triple, sanitizing each channel
    /// the same way a numeric field does.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not contain exactly three parts.
    pub fn from_rgb_triple(text: &str) -> Result<Self> {
        let inner = text
            .trim()
            .trim_start_matches("rgb(")
            .trim_end_matches(')');
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 3 {
            anyhow::bail!("Invalid RGB triple '{text}'. Expected R,G,B");
        }
        Ok(Self::new(
            parse_channel_input(parts[0]),
            parse_channel_input(parts[1]),
            parse_channel_input(parts[2]),
        ))
    }

    /// Converts the color to a "#rrggbb" string using the given letter case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbhex::models::{HexCase, RgbColor};
    ///
    /// let color = RgbColor::new(0, 128, 255);
    /// assert_eq!(color.to_hex_with_case(HexCase::Lower), "#0080ff");
    /// assert_eq!(color.to_hex_with_case(HexCase::Upper), "#0080FF");
    /// ```
    #[must_use]
    pub fn to_hex_with_case(&self, case: HexCase) -> String {
        match case {
            HexCase::Upper => format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b),
            HexCase::Lower => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
        }
    }

    /// Returns the value of a single channel.
    #[must_use]
    pub const fn channel(&self, channel: RgbChannel) -> u8 {
        match channel {
            RgbChannel::Red => self.r,
            RgbChannel::Green => self.g,
            RgbChannel::Blue => self.b,
        }
    }

    /// Returns a copy with one channel replaced.
    #[must_use]
    pub const fn with_channel(self, channel: RgbChannel, value: u8) -> Self {
        match channel {
            RgbChannel::Red => Self { r: value, ..self },
            RgbChannel::Green => Self { g: value, ..self },
            RgbChannel::Blue => Self { b: value, ..self },
        }
    }

    /// Converts the color to a Ratatui Color for terminal rendering.
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_with_case(HexCase::Lower))
    }
}

impl Default for RgbColor {
    /// Default color is the converter's start color (#8db696).
    fn default() -> Self {
        Self::new(141, 182, 150)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("#0000ff").unwrap();
        assert_eq!(color, RgbColor::new(0, 0, 255));

        let color = RgbColor::from_hex("  #8db696  ").unwrap();
        assert_eq!(color, RgbColor::new(141, 182, 150));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#ff00").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
        // from_str_radix alone would accept a sign
        assert!(RgbColor::from_hex("+F+F+F").is_err());
        // multi-byte input must not panic on slicing
        assert!(RgbColor::from_hex("ééé").is_err());
    }

    #[test]
    fn test_to_hex_cases() {
        let color = RgbColor::new(141, 182, 150);
        assert_eq!(color.to_hex_with_case(HexCase::Lower), "#8db696");
        assert_eq!(color.to_hex_with_case(HexCase::Upper), "#8DB696");

        // zero padding per channel
        assert_eq!(RgbColor::new(0, 10, 1).to_hex_with_case(HexCase::Lower), "#000a01");
    }

    #[test]
    fn test_roundtrip_every_channel_value() {
        for v in 0..=255u8 {
            let color = RgbColor::new(v, 255 - v, v / 3);
            for case in [HexCase::Lower, HexCase::Upper] {
                let parsed = RgbColor::from_hex(&color.to_hex_with_case(case)).unwrap();
                assert_eq!(parsed, color);
            }
        }
    }

    #[test]
    fn test_default_is_start_color() {
        assert_eq!(RgbColor::default(), RgbColor::new(141, 182, 150));
        assert_eq!(RgbColor::default().to_string(), "#8db696");
    }

    #[test]
    fn test_is_strict_hex() {
        assert!(is_strict_hex("#8db696"));
        assert!(is_strict_hex("#FF0000"));
        assert!(!is_strict_hex("8db696"));
        assert!(!is_strict_hex("#ff00"));
        assert!(!is_strict_hex("#ff00000"));
        assert!(!is_strict_hex("#gg0000"));
        assert!(!is_strict_hex(" #ff0000"));
        assert!(!is_strict_hex(""));
    }

    #[test]
    fn test_parse_channel_input() {
        assert_eq!(parse_channel_input(""), 0);
        assert_eq!(parse_channel_input("   "), 0);
        assert_eq!(parse_channel_input("0"), 0);
        assert_eq!(parse_channel_input("141"), 141);
        assert_eq!(parse_channel_input(" 42 "), 42);
        assert_eq!(parse_channel_input("255"), 255);
        assert_eq!(parse_channel_input("256"), 255);
        assert_eq!(parse_channel_input("300"), 255);
        assert_eq!(parse_channel_input("-1"), 0);
        assert_eq!(parse_channel_input("+7"), 7);
    }

    #[test]
    fn test_parse_channel_input_overflow_saturates() {
        assert_eq!(parse_channel_input("99999999999999999999999"), 255);
        assert_eq!(parse_channel_input("-99999999999999999999999"), 0);
    }

    #[test]
    fn test_parse_channel_input_non_numeric_is_zero() {
        assert_eq!(parse_channel_input("abc"), 0);
        assert_eq!(parse_channel_input("NaN"), 0);
        assert_eq!(parse_channel_input("inf"), 0);
        assert_eq!(parse_channel_input("12abc"), 0);
    }

    #[test]
    fn test_parse_channel_input_decimal_truncates() {
        assert_eq!(parse_channel_input("12.7"), 12);
        assert_eq!(parse_channel_input("254.99"), 254);
        assert_eq!(parse_channel_input("-0.5"), 0);
        assert_eq!(parse_channel_input("1e3"), 255);
    }

    #[test]
    fn test_channel_accessors() {
        let color = RgbColor::new(1, 2, 3);
        assert_eq!(color.channel(RgbChannel::Red), 1);
        assert_eq!(color.channel(RgbChannel::Green), 2);
        assert_eq!(color.channel(RgbChannel::Blue), 3);

        let updated = color.with_channel(RgbChannel::Green, 200);
        assert_eq!(updated, RgbColor::new(1, 200, 3));
        // original untouched
        assert_eq!(color, RgbColor::new(1, 2, 3));
    }

    #[test]
    fn test_channel_parsing_and_cycling() {
        assert_eq!("r".parse::<RgbChannel>().unwrap(), RgbChannel::Red);
        assert_eq!("Green".parse::<RgbChannel>().unwrap(), RgbChannel::Green);
        assert_eq!(" B ".parse::<RgbChannel>().unwrap(), RgbChannel::Blue);
        assert!("alpha".parse::<RgbChannel>().is_err());

        assert_eq!(RgbChannel::Blue.next(), RgbChannel::Red);
        assert_eq!(RgbChannel::Red.previous(), RgbChannel::Blue);
    }

    #[test]
    fn test_from_rgb_triple() {
        assert_eq!(
            RgbColor::from_rgb_triple("141,182,150").unwrap(),
            RgbColor::new(141, 182, 150)
        );
        assert_eq!(
            RgbColor::from_rgb_triple("rgb(300, -2, abc)").unwrap(),
            RgbColor::new(255, 0, 0)
        );
        assert!(RgbColor::from_rgb_triple("1,2").is_err());
    }

    #[test]
    fn test_hex_case_parse() {
        assert_eq!("upper".parse::<HexCase>().unwrap(), HexCase::Upper);
        assert_eq!("LOWER".parse::<HexCase>().unwrap(), HexCase::Lower);
        assert!("mixed".parse::<HexCase>().is_err());
    }
}
