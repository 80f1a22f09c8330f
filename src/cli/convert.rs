//! One-shot conversion between hex and RGB notation.

use crate::cli::common::{CliError, CliResult};
use crate::models::rgb::HexCase;
use crate::models::RgbColor;
use clap::Args;
use serde::Serialize;

/// Convert a color between `#RRGGBB` and `R,G,B`
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Color as #RRGGBB, RRGGBB, R,G,B or rgb(R, G, B)
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    value: String,

    /// Print hex digits in uppercase
    #[arg(long)]
    upper: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON output for a conversion
#[derive(Serialize, Debug)]
struct ConvertOutput {
    hex: String,
    r: u8,
    g: u8,
    b: u8,
}

/// Which notation the input used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Hex,
    Triple,
}

impl ConvertArgs {
    /// Execute convert command
    pub fn execute(&self) -> CliResult<()> {
        let (color, notation) = parse_value(&self.value)?;
        let case = if self.upper {
            HexCase::Upper
        } else {
            HexCase::Lower
        };

        if self.json {
            let output = ConvertOutput {
                hex: color.to_hex_with_case(case),
                r: color.r,
                g: color.g,
                b: color.b,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            println!("{}", render(color, notation, case));
        }

        Ok(())
    }
}

/// Parse a CLI color value. Anything with a comma is an RGB triple.
fn parse_value(value: &str) -> CliResult<(RgbColor, Notation)> {
    if value.contains(',') {
        RgbColor::from_rgb_triple(value)
            .map(|color| (color, Notation::Triple))
            .map_err(|e| CliError::validation(e.to_string()))
    } else {
        RgbColor::from_hex(value)
            .map(|color| (color, Notation::Hex))
            .map_err(|e| CliError::validation(format!("Invalid hex color '{value}': {e}")))
    }
}

/// The opposite notation of the input.
fn render(color: RgbColor, input: Notation, case: HexCase) -> String {
    match input {
        Notation::Hex => format!("rgb({}, {}, {})", color.r, color.g, color.b),
        Notation::Triple => color.to_hex_with_case(case),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_hex() {
        let (color, notation) = parse_value("#8db696").unwrap();
        assert_eq!(color, RgbColor::new(141, 182, 150));
        assert_eq!(notation, Notation::Hex);
        assert_eq!(parse_value("8DB696").unwrap().0, color);
    }

    #[test]
    fn test_parse_value_triple_sanitizes() {
        let (color, notation) = parse_value("300,abc,-5").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));
        assert_eq!(notation, Notation::Triple);
        assert_eq!(parse_value("rgb(1, 2, 3)").unwrap().0, RgbColor::new(1, 2, 3));
    }

    #[test]
    fn test_parse_value_invalid() {
        let err = parse_value("#ff00").unwrap_err();
        assert_eq!(err.exit_code.code(), 1);
        assert!(parse_value("1,2").is_err());
    }

    #[test]
    fn test_render_opposite_notation() {
        let color = RgbColor::new(141, 182, 150);
        assert_eq!(render(color, Notation::Hex, HexCase::Lower), "rgb(141, 182, 150)");
        assert_eq!(render(color, Notation::Triple, HexCase::Lower), "#8db696");
        assert_eq!(render(color, Notation::Triple, HexCase::Upper), "#8DB696");
    }
}
