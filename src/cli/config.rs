//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{Config, ThemeMode};
use crate::models::rgb::HexCase;
use crate::models::RgbColor;
use crate::services::CommitPolicyKind;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the configuration file path
    Path,
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Slider debounce delay in milliseconds (0-1000)
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Slider commit policy (debounced or on_release)
    #[arg(long, value_name = "POLICY")]
    commit_policy: Option<String>,

    /// Hex letter case (lower or upper)
    #[arg(long, value_name = "CASE")]
    hex_case: Option<String>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Color shown at startup (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    initial_color: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    converter: ConverterOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct ConverterOutput {
    initial_color: String,
    commit_policy: String,
    debounce_ms: u64,
    hex_case: String,
    copy_feedback_ms: u64,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    show_help: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path().map_err(|e| {
                    CliError::io(format!("Failed to resolve configuration path: {e}"))
                })?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.debounce_ms.is_none()
            && self.commit_policy.is_none()
            && self.hex_case.is_none()
            && self.theme.is_none()
            && self.initial_color.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --debounce-ms, --commit-policy, --hex-case, --theme, or --initial-color",
            ));
        }

        // A broken file is replaced rather than blocking the fix
        let mut config = Config::load().unwrap_or_default();

        if let Some(ms) = self.debounce_ms {
            config.converter.debounce_ms = ms;
        }

        if let Some(policy) = &self.commit_policy {
            config.converter.commit_policy = policy
                .parse::<CommitPolicyKind>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(case) = &self.hex_case {
            config.converter.hex_case = case
                .parse::<HexCase>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(theme) = &self.theme {
            config.ui.theme_mode = theme
                .parse::<ThemeMode>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(hex) = &self.initial_color {
            let color = RgbColor::from_hex(hex)
                .map_err(|e| CliError::validation(format!("Invalid initial color '{hex}': {e}")))?;
            config.converter.initial_color = color.to_hex_with_case(config.converter.hex_case);
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))?;

        // Save configuration
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn theme_name(mode: ThemeMode) -> String {
    format!("{mode:?}").to_lowercase()
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        converter: ConverterOutput {
            initial_color: config.converter.initial_color.clone(),
            commit_policy: config.converter.commit_policy.to_string(),
            debounce_ms: config.converter.debounce_ms,
            hex_case: config.converter.hex_case.to_string(),
            copy_feedback_ms: config.converter.copy_feedback_ms,
        },
        ui: UiOutput {
            theme: theme_name(config.ui.theme_mode),
            show_help: config.ui.show_help,
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("RgbHex Configuration");
    println!("====================");
    println!();

    println!("Converter:");
    println!("  Initial Color: {}", config.converter.initial_color);
    println!("  Commit Policy: {}", config.converter.commit_policy);
    println!("  Debounce: {} ms", config.converter.debounce_ms);
    println!("  Hex Case: {}", config.converter.hex_case);
    println!("  Copy Feedback: {} ms", config.converter.copy_feedback_ms);
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", theme_name(config.ui.theme_mode));
    println!("  Show Help: {}", config.ui.show_help);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_set() -> ConfigSetArgs {
        ConfigSetArgs {
            debounce_ms: None,
            commit_policy: None,
            hex_case: None,
            theme: None,
            initial_color: None,
        }
    }

    #[test]
    fn test_set_requires_an_option() {
        let err = empty_set().execute().unwrap_err();
        assert_eq!(err.exit_code.code(), 1);
        assert!(err.message.contains("--debounce-ms"));
    }

    #[test]
    fn test_theme_name() {
        assert_eq!(theme_name(ThemeMode::Auto), "auto");
        assert_eq!(theme_name(ThemeMode::Light), "light");
        assert_eq!(theme_name(ThemeMode::Dark), "dark");
    }
}
