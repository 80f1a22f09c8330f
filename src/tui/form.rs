//! The converter form: numeric fields, sliders, hex field, copy button and
//! preview swatch.
//!
//! Layout is computed from the frame area alone so mouse hit-testing and
//! rendering always agree.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for slider math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::time::Instant;

use super::{AppState, Theme};
use crate::constants::{CHANNEL_INPUT_MAX_LEN, HEX_INPUT_MAX_LEN};
use crate::models::RgbChannel;

/// Large slider step (Up/Down, PageUp/PageDown)
const SLIDER_STEP_LARGE: i16 = 10;

/// Focusable element of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Numeric field for a channel
    Channel(RgbChannel),
    /// Slider for a channel
    Slider(RgbChannel),
    /// Hex text field
    Hex,
    /// Copy button
    Copy,
}

impl FormField {
    /// Tab order.
    pub const ORDER: [Self; 8] = [
        Self::Channel(RgbChannel::Red),
        Self::Slider(RgbChannel::Red),
        Self::Channel(RgbChannel::Green),
        Self::Slider(RgbChannel::Green),
        Self::Channel(RgbChannel::Blue),
        Self::Slider(RgbChannel::Blue),
        Self::Hex,
        Self::Copy,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field in tab order (wraps).
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous field in tab order (wraps).
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

impl Default for FormField {
    fn default() -> Self {
        Self::Channel(RgbChannel::Red)
    }
}

/// Screen areas of every form element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    /// Title line
    pub title: Rect,
    /// Numeric fields (R, G, B)
    pub channels: [Rect; 3],
    /// Sliders (R, G, B)
    pub sliders: [Rect; 3],
    /// Hex field
    pub hex: Rect,
    /// Copy button
    pub copy: Rect,
    /// Preview swatch
    pub preview: Rect,
    /// Status/help area
    pub status: Rect,
}

impl FormLayout {
    /// Split the frame area into form elements.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(16),   // Form
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        let form = centered_rect(80, 100, outer[0]);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Red
                Constraint::Length(3), // Green
                Constraint::Length(3), // Blue
                Constraint::Length(3), // Hex + copy
                Constraint::Min(3),    // Preview
            ])
            .split(form);

        let mut channels = [Rect::default(); 3];
        let mut sliders = [Rect::default(); 3];
        for i in 0..3 {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(12), Constraint::Min(10)])
                .split(rows[i + 1]);
            channels[i] = cols[0];
            sliders[i] = cols[1];
        }

        let hex_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Length(14),
                Constraint::Min(0),
            ])
            .split(rows[4]);

        Self {
            title: rows[0],
            channels,
            sliders,
            hex: hex_row[0],
            copy: hex_row[1],
            preview: rows[5],
            status: outer[1],
        }
    }

    /// Which field sits at a screen position.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<FormField> {
        let pos = Position::new(column, row);
        for (i, channel) in RgbChannel::ALL.iter().enumerate() {
            if self.channels[i].contains(pos) {
                return Some(FormField::Channel(*channel));
            }
            if self.sliders[i].contains(pos) {
                return Some(FormField::Slider(*channel));
            }
        }
        if self.hex.contains(pos) {
            Some(FormField::Hex)
        } else if self.copy.contains(pos) {
            Some(FormField::Copy)
        } else {
            None
        }
    }

    /// Slider rect for a channel.
    #[must_use]
    pub const fn slider(&self, channel: RgbChannel) -> Rect {
        match channel {
            RgbChannel::Red => self.sliders[0],
            RgbChannel::Green => self.sliders[1],
            RgbChannel::Blue => self.sliders[2],
        }
    }
}

/// Map a column inside a slider to a channel value.
#[must_use]
pub fn slider_value_at(slider: Rect, column: u16) -> u8 {
    if slider.width <= 1 {
        return 0;
    }
    let offset = u32::from(column.saturating_sub(slider.x)).min(u32::from(slider.width - 1));
    (offset * 255 / u32::from(slider.width - 1)) as u8
}

/// Render the converter form
pub fn render_form(f: &mut Frame, layout: &FormLayout, state: &AppState) {
    let theme = &state.theme;
    let snapshot = state.converter.snapshot();

    let title = Paragraph::new("Color Converter").style(
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, layout.title);

    let channel_colors = [Color::Red, Color::Green, Color::Blue];
    for (i, channel) in RgbChannel::ALL.iter().enumerate() {
        render_channel_field(
            f,
            layout.channels[i],
            *channel,
            snapshot.color.channel(*channel),
            state.focus == FormField::Channel(*channel),
            theme,
        );
        render_channel_slider(
            f,
            layout.sliders[i],
            channel.label(),
            snapshot.sliders.channel(*channel),
            channel_colors[i],
            state.focus == FormField::Slider(*channel),
            theme.text_muted,
        );
    }

    render_hex_field(f, layout.hex, &snapshot.hex_text, state.focus == FormField::Hex, theme);
    render_copy_button(f, layout.copy, snapshot.copied, state.focus == FormField::Copy, theme);

    let preview = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(snapshot.preview.to_ratatui_color()));
    f.render_widget(preview, layout.preview);
}

fn field_block(title: &str, focused: bool, theme: &Theme) -> Block<'static> {
    let border = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    if title.is_empty() {
        block
    } else {
        block.title(format!(" {title} "))
    }
}

fn render_channel_field(
    f: &mut Frame,
    area: Rect,
    channel: RgbChannel,
    value: u8,
    focused: bool,
    theme: &Theme,
) {
    let label = &channel.label()[..1];
    let field = Paragraph::new(value.to_string())
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .block(field_block(label, focused, theme));
    f.render_widget(field, area);

    if focused {
        let len = value.to_string().len() as u16;
        f.set_cursor_position(Position::new(area.x + 1 + len, area.y + 1));
    }
}

/// Render a single channel slider
fn render_channel_slider(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: u8,
    color: Color,
    is_active: bool,
    inactive_color: Color,
) {
    let percentage = (u16::from(value) * 100 / 255).min(100);
    let label_text = format!("{label}: {value:3}");

    let style = if is_active {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive_color)
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(style)
        .label(label_text)
        .percent(percentage);

    f.render_widget(gauge, area);
}

fn render_hex_field(f: &mut Frame, area: Rect, hex_text: &str, focused: bool, theme: &Theme) {
    let field = Paragraph::new(hex_text.to_string())
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .block(field_block("HEX", focused, theme));
    f.render_widget(field, area);

    if focused {
        let len = hex_text.chars().count() as u16;
        f.set_cursor_position(Position::new(area.x + 1 + len, area.y + 1));
    }
}

fn render_copy_button(f: &mut Frame, area: Rect, copied: bool, focused: bool, theme: &Theme) {
    let (text, style) = if copied {
        (
            "Copied!",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("Copy", Style::default().fg(theme.text))
    };
    let button = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(field_block("", focused, theme));
    f.render_widget(button, area);
}

/// Handle a key press for the form. Returns Ok(true) if the user asked to quit.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => Ok(true),
            KeyCode::Char('y') => {
                state.copy_hex(now);
                Ok(false)
            }
            KeyCode::Char('u') if state.focus == FormField::Hex => {
                state.converter.on_hex_input("");
                Ok(false)
            }
            _ => Ok(false),
        };
    }

    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Tab => {
            state.move_focus(state.focus.next(), now);
            return Ok(false);
        }
        KeyCode::BackTab => {
            state.move_focus(state.focus.previous(), now);
            return Ok(false);
        }
        _ => {}
    }

    match state.focus {
        FormField::Channel(channel) => handle_channel_key(state, channel, key, now),
        FormField::Slider(channel) => handle_slider_key(state, channel, key, now),
        FormField::Hex => handle_hex_key(state, key, now),
        FormField::Copy => handle_copy_key(state, key, now),
    }
}

fn handle_channel_key(
    state: &mut AppState,
    channel: RgbChannel,
    key: KeyEvent,
    now: Instant,
) -> Result<bool> {
    let current = state.converter.color().channel(channel).to_string();
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if current.len() < CHANNEL_INPUT_MAX_LEN {
                state.converter.on_number_input(channel, &format!("{current}{c}"));
            }
        }
        KeyCode::Backspace => {
            let mut text = current;
            text.pop();
            state.converter.on_number_input(channel, &text);
        }
        KeyCode::Delete => {
            state.converter.on_number_input(channel, "");
        }
        KeyCode::Up => state.move_focus(state.focus.previous(), now),
        KeyCode::Down | KeyCode::Enter => state.move_focus(state.focus.next(), now),
        _ => {}
    }
    Ok(false)
}

fn handle_slider_key(
    state: &mut AppState,
    channel: RgbChannel,
    key: KeyEvent,
    now: Instant,
) -> Result<bool> {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') => state.converter.nudge_channel(channel, 1, now),
        KeyCode::Left | KeyCode::Char('h') => state.converter.nudge_channel(channel, -1, now),
        KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => {
            state.converter.nudge_channel(channel, SLIDER_STEP_LARGE, now);
        }
        KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') => {
            state.converter.nudge_channel(channel, -SLIDER_STEP_LARGE, now);
        }
        KeyCode::Home => state.converter.on_slider_input(channel, "0", now),
        KeyCode::End => state.converter.on_slider_input(channel, "255", now),
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.converter.on_slider_release(now);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_hex_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    let current = state.converter.hex_text().to_string();
    match key.code {
        KeyCode::Char(c) => {
            if current.chars().count() < HEX_INPUT_MAX_LEN {
                state.converter.on_hex_input(&format!("{current}{c}"));
            }
        }
        KeyCode::Backspace => {
            let mut text = current;
            text.pop();
            state.converter.on_hex_input(&text);
        }
        KeyCode::Up => state.move_focus(state.focus.previous(), now),
        KeyCode::Down | KeyCode::Enter => state.move_focus(state.focus.next(), now),
        _ => {}
    }
    Ok(false)
}

fn handle_copy_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => state.copy_hex(now),
        KeyCode::Up => state.move_focus(state.focus.previous(), now),
        _ => {}
    }
    Ok(false)
}

/// Handle a mouse event: slider drags, field focus and the copy button.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let Some(layout) = state.layout else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match layout.hit_test(mouse.column, mouse.row) {
                Some(FormField::Slider(channel)) => {
                    state.move_focus(FormField::Slider(channel), now);
                    state.dragging = Some(channel);
                    let value = slider_value_at(layout.slider(channel), mouse.column);
                    state
                        .converter
                        .on_slider_input(channel, &value.to_string(), now);
                }
                Some(FormField::Copy) => {
                    state.move_focus(FormField::Copy, now);
                    state.copy_hex(now);
                }
                Some(field) => state.move_focus(field, now),
                None => {}
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(channel) = state.dragging {
                let value = slider_value_at(layout.slider(channel), mouse.column);
                state
                    .converter
                    .on_slider_input(channel, &value.to_string(), now);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.dragging.take().is_some() {
                state.converter.on_slider_release(now);
            }
        }
        _ => {}
    }
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
