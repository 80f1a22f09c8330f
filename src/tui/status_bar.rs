//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form::FormField;
use super::{AppState, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status line and, if enabled, contextual key help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let status_line = match &state.error_message {
            Some(error) => Line::from(Span::styled(error.as_str(), Style::default().fg(theme.error))),
            None => Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.text),
            )),
        };

        let mut lines = vec![status_line];
        if state.config.ui.show_help {
            lines.push(Self::help_line(state.focus, theme));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.text_muted)),
        );
        f.render_widget(paragraph, area);
    }

    fn help_line(focus: FormField, theme: &Theme) -> Line<'static> {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
        let text = |t: &'static str| Span::styled(t, Style::default().fg(theme.text_muted));

        let mut spans = match focus {
            FormField::Channel(_) => vec![key("0-9"), text(" Type  "), key("Del"), text(" Zero  ")],
            FormField::Slider(_) => vec![
                key("←→"),
                text(" ±1  "),
                key("↑↓"),
                text(" ±10  "),
                key("Enter"),
                text(" Release  "),
            ],
            FormField::Hex => vec![key("#RRGGBB"), text(" Type  "), key("Ctrl+U"), text(" Clear  ")],
            FormField::Copy => vec![key("Enter"), text(" Copy  ")],
        };
        spans.extend([
            key("Tab"),
            text(" Next  "),
            key("Ctrl+Y"),
            text(" Copy  "),
            key("Esc"),
            text(" Quit"),
        ]);
        Line::from(spans)
    }
}
