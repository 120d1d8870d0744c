//! Annual temperature table.
//!
//! One row per month with the high and low (and the day each occurred) and
//! the monthly average.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::MeasurementKind;

/// Render the annual view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Annual Temperatures ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let annual = &app.dashboard.annual;
    if annual.is_empty() {
        let paragraph = Paragraph::new("No annual data")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Month"),
        Cell::from("High"),
        Cell::from("On"),
        Cell::from("Low"),
        Cell::from("On"),
        Cell::from("Average"),
    ])
    .style(app.theme.header);

    let value_style = Style::default().fg(app.theme.measurement_color(MeasurementKind::Temperature));
    let date_style = Style::default().fg(app.theme.muted);

    let rows: Vec<Row> = annual
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.month.clone()),
                Cell::from(row.high.value.clone()).style(value_style),
                Cell::from(row.high.at.clone()).style(date_style),
                Cell::from(row.low.value.clone()).style(value_style),
                Cell::from(row.low.at.clone()).style(date_style),
                Cell::from(row.average.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2), // Month
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(header).block(block);

    frame.render_widget(table, area);
}
