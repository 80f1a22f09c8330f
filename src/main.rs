//! RgbHex - terminal RGB/hex color converter
//!
//! Starts the interactive converter by default; `convert` and `config`
//! subcommands give headless access for scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rgbhex::cli::{CliResult, ConfigArgs, ConvertArgs, ExitCode};
use rgbhex::config::{Config, MAX_DEBOUNCE_MS};
use rgbhex::constants::{APP_NAME, LOG_FILE_NAME};
use rgbhex::models::{HexCase, RgbColor};
use rgbhex::services::{ColorConverter, CommitPolicyKind};
use rgbhex::tui::{self, AppState, SystemClipboard, Theme};

/// RgbHex - convert colors between RGB and hex with live two-way sync
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Start color (#RRGGBB or R,G,B)
    #[arg(long, value_name = "COLOR", allow_hyphen_values = true)]
    color: Option<String>,

    /// Slider debounce delay in milliseconds
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Commit slider drags on release instead of after a pause
    #[arg(long)]
    commit_on_release: bool,

    /// Show hex digits in uppercase
    #[arg(long)]
    upper: bool,

    /// Log file (defaults to rgbhex.log in the config directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a color between hex and RGB notation
    Convert(ConvertArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let code = match &cli.command {
        Some(Command::Convert(args)) => report(args.execute()),
        Some(Command::Config(args)) => report(args.execute()),
        None => match run_interactive(&cli) {
            Ok(()) => ExitCode::Success.code(),
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::ValidationError.code()
            }
        },
    };

    std::process::exit(code);
}

/// Print a CLI error to stderr and map it to an exit code.
fn report(result: CliResult<()>) -> i32 {
    match result {
        Ok(()) => ExitCode::Success.code(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code.code()
        }
    }
}

/// Apply one-run flag overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(value) = &cli.color {
        let color = if value.contains(',') {
            RgbColor::from_rgb_triple(value)?
        } else {
            RgbColor::from_hex(value).context(format!("Invalid --color '{value}'"))?
        };
        config.converter.initial_color = color.to_hex_with_case(HexCase::Lower);
    }
    if let Some(ms) = cli.debounce_ms {
        if ms > MAX_DEBOUNCE_MS {
            anyhow::bail!("--debounce-ms must be at most {MAX_DEBOUNCE_MS}, got {ms}");
        }
        config.converter.debounce_ms = ms;
    }
    if cli.commit_on_release {
        config.converter.commit_policy = CommitPolicyKind::OnRelease;
    }
    if cli.upper {
        config.converter.hex_case = HexCase::Upper;
    }
    config.validate()
}

/// Route `tracing` output to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create log directory: {}",
                parent.display()
            ))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context(format!("Failed to open log file: {}", path.display()))?;

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn run_interactive(cli: &Cli) -> Result<()> {
    let log_path = match &cli.log_file {
        Some(path) => path.clone(),
        None => Config::config_dir()?.join(LOG_FILE_NAME),
    };
    init_logging(&log_path, cli.verbose)?;

    let mut config = Config::load()?;
    apply_overrides(&mut config, cli)?;
    let options = config.converter_options()?;
    info!(
        app = APP_NAME,
        version = env!("CARGO_PKG_VERSION"),
        initial = %options.initial_color,
        "starting"
    );

    let theme = Theme::from_mode(config.ui.theme_mode);
    let mut state = AppState::new(
        ColorConverter::new(options),
        config,
        theme,
        Box::new(SystemClipboard::new()),
    );

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rgbhex").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_overrides_apply() {
        let cli = parse(&["--color", "255,0,0", "--debounce-ms", "50", "--commit-on-release", "--upper"]);
        let mut config = Config::default();
        apply_overrides(&mut config, &cli).unwrap();

        assert_eq!(config.converter.initial_color, "#ff0000");
        assert_eq!(config.converter.debounce_ms, 50);
        assert_eq!(config.converter.commit_policy, CommitPolicyKind::OnRelease);
        assert_eq!(config.converter.hex_case, HexCase::Upper);
    }

    #[test]
    fn test_overrides_reject_bad_values() {
        let mut config = Config::default();
        assert!(apply_overrides(&mut config, &parse(&["--color", "#ff00"])).is_err());
        assert!(apply_overrides(&mut config, &parse(&["--debounce-ms", "5000"])).is_err());
    }

    #[test]
    fn test_subcommands_parse() {
        assert!(matches!(
            parse(&["convert", "#8db696"]).command,
            Some(Command::Convert(_))
        ));
        assert!(matches!(
            parse(&["config", "show", "--json"]).command,
            Some(Command::Config(_))
        ));
        assert!(parse(&[]).command.is_none());
    }
}
