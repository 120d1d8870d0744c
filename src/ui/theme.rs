//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::MeasurementKind;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for errors in the status bar.
    pub error: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for axes, labels, and other secondary text.
    pub muted: Color,
    /// Series colors.
    pub temperature: Color,
    pub dewpoint: Color,
    pub humidity: Color,
    pub pressure: Color,
    /// Color for reference lines (freezing point, start of day).
    pub reference: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            error: Color::Red,
            border: Color::Gray,
            muted: Color::DarkGray,
            temperature: Color::LightRed,
            dewpoint: Color::LightMagenta,
            humidity: Color::LightBlue,
            pressure: Color::Cyan,
            reference: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            border: Color::DarkGray,
            muted: Color::Gray,
            temperature: Color::Red,
            dewpoint: Color::Magenta,
            humidity: Color::Blue,
            pressure: Color::DarkGray,
            reference: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Color used for a measurement wherever it is shown.
    pub fn measurement_color(&self, kind: MeasurementKind) -> Color {
        match kind {
            MeasurementKind::Temperature => self.temperature,
            MeasurementKind::DewPoint => self.dewpoint,
            MeasurementKind::Humidity => self.humidity,
            MeasurementKind::Pressure => self.pressure,
        }
    }

    /// Bold style in a measurement's color, for headline values.
    pub fn value_style(&self, kind: MeasurementKind) -> Style {
        Style::default()
            .fg(self.measurement_color(kind))
            .add_modifier(Modifier::BOLD)
    }
}
