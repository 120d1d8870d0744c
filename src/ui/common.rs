//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

const VIEWS: [View; 3] = [View::Current, View::Charts, View::Annual];

fn tab_title(index: usize, view: View) -> String {
    format!(" {}:{} ", index + 1, view.label())
}

/// Map a column on the tab row to the tab drawn there.
///
/// Mirrors the layout of [`Tabs`]: one column of padding on each side of a
/// title and a one-column divider between tabs.
pub fn tab_at(column: u16) -> Option<View> {
    let mut end = 0u16;
    for (i, view) in VIEWS.iter().enumerate() {
        // padding + title + padding + divider
        end += tab_title(i, *view).chars().count() as u16 + 3;
        if column < end {
            return Some(*view);
        }
    }
    None
}

/// Render the header bar with the station name and display settings.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (indicator, indicator_style) = if app.load_error.is_some() {
        ("●", Style::default().fg(app.theme.error))
    } else if app.has_data() {
        ("●", Style::default().fg(app.theme.highlight))
    } else {
        ("○", Style::default().add_modifier(Modifier::DIM))
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", indicator), indicator_style),
        Span::styled(
            app.station.name.to_uppercase(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(ref location) = app.station.location {
        spans.push(Span::raw(" │ "));
        spans.push(Span::raw(location.clone()));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        app.unit_system.as_str(),
        Style::default().fg(app.theme.highlight),
    ));
    spans.push(Span::raw(format!(" │ {}", app.dashboard.timezone)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = VIEWS
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(tab_title(i, *view)))
        .collect();

    let selected = VIEWS.iter().position(|v| *v == app.current_view).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Status bar text for the current state, without any temporary message.
pub fn status_text(app: &App) -> String {
    let controls = match app.current_view {
        View::Charts => "↑↓:chart u:units r:refresh Tab:switch ?:help q:quit",
        _ => "u:units r:refresh e:export Tab:switch ?:help q:quit",
    };

    match (&app.load_error, app.last_updated) {
        (Some(err), Some(_)) => format!(" Error: {} (showing last data) | {}", err, controls),
        (Some(err), None) => format!(" Error: {} | r:retry q:quit", err),
        (None, Some(updated)) => format!(
            " {} | Updated {:.0}s ago | {}",
            app.source_description(),
            updated.elapsed().as_secs_f64(),
            controls,
        ),
        (None, None) => " Loading... | q:quit".to_string(),
    }
}

/// Render the status bar at the bottom.
///
/// Shows the data source, time since last update, and available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let style = if app.load_error.is_some() {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    frame.render_widget(Paragraph::new(status_text(app)).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Jump to view"),
        Line::from("  ↑/↓ j/k     Switch chart"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" General"),
        Line::from("  u         Toggle metric/imperial"),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
