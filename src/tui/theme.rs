//! Dark and light color sets for the converter form.
//!
//! `Auto` follows the OS appearance through `dark-light`; `Dark` and `Light`
//! pin one set regardless of the OS.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic colors used by the form and status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Title and preview border
    pub primary: Color,
    /// Focused field border and key hints
    pub accent: Color,
    /// "Copied!" label
    pub success: Color,
    /// Status-line errors
    pub error: Color,
    /// Field values and status text
    pub text: Color,
    /// Unfocused borders, idle sliders, help text
    pub text_muted: Color,
    /// Screen fill
    pub background: Color,
    /// Input field fill
    pub surface: Color,
}

impl Theme {
    /// Theme matching the OS appearance. Unknown or undetectable modes use
    /// the dark set.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            dark_light::Mode::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured preference.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Colors for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            text: Color::White,
            text_muted: Color::DarkGray,
            background: Color::Black,
            surface: Color::Rgb(30, 30, 30),
        }
    }

    /// Colors for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            text: Color::Black,
            text_muted: Color::Gray,
            background: Color::White,
            surface: Color::Rgb(245, 245, 245),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
