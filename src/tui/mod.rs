//! Terminal user interface hosting the converter.
//!
//! This module contains the main TUI loop, `AppState`, event dispatch,
//! and the widgets that draw the converter form using Ratatui.

pub mod clipboard;
pub mod form;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, style::Style, widgets::Block, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::services::{ClipboardWriter, ColorConverter};

pub use clipboard::SystemClipboard;
pub use form::{FormField, FormLayout};
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Longest wait for input when no converter timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Application state for the TUI host
pub struct AppState {
    /// The color state manager
    pub converter: ColorConverter,
    /// Loaded configuration
    pub config: Config,
    /// Active theme
    pub theme: Theme,
    /// Focused form element
    pub focus: FormField,
    /// Status line text
    pub status_message: String,
    /// Error line text (replaces the status line while set)
    pub error_message: Option<String>,
    /// Layout from the last frame, for mouse hit-testing
    pub layout: Option<FormLayout>,
    /// Channel whose slider is being dragged with the mouse
    pub dragging: Option<crate::models::RgbChannel>,
    clipboard: Box<dyn ClipboardWriter>,
}

impl AppState {
    /// Create app state around a converter.
    pub fn new(
        converter: ColorConverter,
        config: Config,
        theme: Theme,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> Self {
        Self {
            converter,
            config,
            theme,
            focus: FormField::default(),
            status_message: "Edit RGB or hex; both stay in sync".to_string(),
            error_message: None,
            layout: None,
            dragging: None,
            clipboard,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Move focus. Leaving a slider ends its drag gesture.
    pub fn move_focus(&mut self, field: FormField, now: Instant) {
        if field == self.focus {
            return;
        }
        if matches!(self.focus, FormField::Slider(_)) {
            self.converter.on_slider_release(now);
        }
        self.focus = field;
    }

    /// Copy the hex text and report the outcome on the status line.
    pub fn copy_hex(&mut self, now: Instant) {
        match self.converter.copy(self.clipboard.as_mut(), now) {
            Ok(()) => {
                let hex = self.converter.hex_text().to_string();
                self.set_status(format!("Copied {hex} to clipboard"));
            }
            Err(e) => self.set_error(format!("Failed to copy to clipboard: {e}")),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("converter", &self.converter)
            .field("focus", &self.focus)
            .field("status_message", &self.status_message)
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    info!(
        color = %state.converter.color(),
        policy = ?state.converter.commit_policy(),
        "converter started"
    );

    loop {
        let size = terminal.size().context("Failed to read terminal size")?;
        state.layout = Some(FormLayout::compute(Rect::new(0, 0, size.width, size.height)));

        terminal.draw(|f| render(f, state))?;

        if event::poll(poll_timeout(&state.converter, Instant::now()))? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if form::handle_key(state, key, now)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => form::handle_mouse(state, mouse, now),
                // Resize and focus changes re-render on the next iteration
                _ => {}
            }
        }

        if state.converter.tick(Instant::now()) {
            debug!(hex = state.converter.hex_text(), "timer fired");
        }
    }

    info!(color = %state.converter.color(), "converter closed");
    Ok(())
}

/// Wait for input no longer than the next converter deadline.
fn poll_timeout(converter: &ColorConverter, now: Instant) -> Duration {
    converter
        .next_deadline()
        .map_or(IDLE_POLL, |deadline| {
            deadline.saturating_duration_since(now).min(IDLE_POLL)
        })
}

/// Draw one frame
pub fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let layout = state
        .layout
        .unwrap_or_else(|| FormLayout::compute(f.area()));

    form::render_form(f, &layout, state);
    StatusBar::render(f, layout.status, state, &state.theme);
}
