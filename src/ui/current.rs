//! Current conditions view.
//!
//! Shows the latest reading as a row of cards, followed by statistics over
//! the past 24 hours.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{ExtremeFigure, MeasurementKind};

/// Render the current conditions view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // "As of" line
        Constraint::Length(5), // Current reading cards
        Constraint::Length(1), // Section title
        Constraint::Length(5), // 24h stat cards
        Constraint::Min(0),
    ])
    .split(area);

    let as_of = Line::from(vec![
        Span::styled(" Current conditions ", app.theme.header),
        Span::styled(
            format!("as of {}", app.dashboard.current.as_of),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(as_of), chunks[0]);

    render_current_cards(frame, app, chunks[1]);

    frame.render_widget(
        Paragraph::new(Span::styled(" Past 24 hours", app.theme.header)),
        chunks[2],
    );

    render_daily_cards(frame, app, chunks[3]);
}

fn render_current_cards(frame: &mut Frame, app: &App, area: Rect) {
    let current = &app.dashboard.current;
    let cards = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    render_card(
        frame,
        app,
        cards[0],
        "Temperature",
        vec![
            Line::from(Span::styled(
                current.temperature.clone(),
                app.theme.value_style(MeasurementKind::Temperature),
            )),
            Line::from(vec![
                Span::styled("Dew point ", Style::default().fg(app.theme.muted)),
                Span::styled(
                    current.dewpoint.clone(),
                    Style::default().fg(app.theme.measurement_color(MeasurementKind::DewPoint)),
                ),
            ]),
        ],
    );

    render_card(
        frame,
        app,
        cards[1],
        "Humidity",
        vec![Line::from(Span::styled(
            current.humidity.clone(),
            app.theme.value_style(MeasurementKind::Humidity),
        ))],
    );

    render_card(
        frame,
        app,
        cards[2],
        "Pressure",
        vec![Line::from(Span::styled(
            current.pressure.clone(),
            app.theme.value_style(MeasurementKind::Pressure),
        ))],
    );
}

fn render_daily_cards(frame: &mut Frame, app: &App, area: Rect) {
    let daily = &app.dashboard.daily;
    let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    let extreme = |figure: &ExtremeFigure| {
        vec![
            Line::from(Span::styled(
                figure.value.clone(),
                app.theme.value_style(MeasurementKind::Temperature),
            )),
            Line::from(Span::styled(
                format!("at {}", figure.at),
                Style::default().fg(app.theme.muted),
            )),
        ]
    };

    render_card(frame, app, cards[0], "Max Temperature", extreme(&daily.max_temperature));
    render_card(frame, app, cards[1], "Min Temperature", extreme(&daily.min_temperature));
    render_card(
        frame,
        app,
        cards[2],
        "Avg Humidity",
        vec![Line::from(Span::styled(
            daily.avg_humidity.clone(),
            app.theme.value_style(MeasurementKind::Humidity),
        ))],
    );
    render_card(
        frame,
        app,
        cards[3],
        "Avg Pressure",
        vec![Line::from(Span::styled(
            daily.avg_pressure.clone(),
            app.theme.value_style(MeasurementKind::Pressure),
        ))],
    );
}

fn render_card(frame: &mut Frame, app: &App, area: Rect, title: &str, lines: Vec<Line>) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
