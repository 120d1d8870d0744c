//! 24-hour line charts.
//!
//! One chart is shown at a time; ↑/↓ switches between temperature, humidity
//! and pressure. Reference lines are drawn as two-point datasets.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{ChartData, ChartKind, ReferenceLine};

/// Render the charts view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(6)]).split(area);

    render_chart_selector(frame, app, chunks[0]);

    match app.dashboard.chart(app.chart_kind()) {
        Some(chart) if !chart.is_empty() => render_chart(frame, app, chart, chunks[1]),
        _ => render_empty(frame, app, chunks[1]),
    }
}

fn render_chart_selector(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.chart_kind();
    let mut spans = vec![Span::raw(" ")];

    for kind in ChartKind::ALL {
        let style = if kind == selected {
            app.theme.tab_active
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(format!("[{}]", kind.primary().label()), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let block = chart_block(app, app.chart_kind().title());
    let paragraph = Paragraph::new("No data for the past 24 hours")
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

fn chart_block<'a>(app: &App, title: &str) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Endpoints of a reference line clipped to the chart's bounds, or `None`
/// when the line falls outside them.
fn reference_points(line: &ReferenceLine, chart: &ChartData) -> Option<Vec<(f64, f64)>> {
    let [x_min, x_max] = chart.x_bounds;
    let [y_min, y_max] = chart.y_bounds;

    match line {
        ReferenceLine::Vertical { x, .. } if (x_min..=x_max).contains(x) => {
            Some(vec![(*x, y_min), (*x, y_max)])
        }
        ReferenceLine::Horizontal { y } if (y_min..=y_max).contains(y) => {
            Some(vec![(x_min, *y), (x_max, *y)])
        }
        _ => None,
    }
}

/// Tick labels for the y axis: bottom, middle, top.
fn y_labels(chart: &ChartData) -> Vec<String> {
    let [low, high] = chart.y_bounds;
    let precision = if high - low < 1.0 { 2 } else { 0 };
    [low, (low + high) / 2.0, high]
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect()
}

fn render_chart(frame: &mut Frame, app: &App, chart: &ChartData, area: Rect) {
    let series: Vec<_> = chart
        .lines
        .iter()
        .map(|line| (line.kind, line.plot_points()))
        .collect();

    let references: Vec<(String, Vec<(f64, f64)>)> = chart
        .reference_lines
        .iter()
        .filter_map(|line| {
            let name = match line {
                ReferenceLine::Vertical { label, .. } => label.clone(),
                ReferenceLine::Horizontal { .. } => "Freezing".to_string(),
            };
            reference_points(line, chart).map(|points| (name, points))
        })
        .collect();

    let mut datasets: Vec<Dataset> = references
        .iter()
        .map(|(name, points)| {
            Dataset::default()
                .name(name.as_str())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.reference))
                .data(points)
        })
        .collect();

    // Series last so they draw over the reference lines
    datasets.extend(series.iter().map(|(kind, points)| {
        Dataset::default()
            .name(kind.label())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.measurement_color(*kind)))
            .data(points)
    }));

    let axis_style = Style::default().fg(app.theme.muted);
    let x_axis = Axis::default()
        .style(axis_style)
        .bounds(chart.x_bounds)
        .labels(chart.x_labels.iter().map(String::as_str).map(Span::from).collect::<Vec<_>>());
    let y_axis = Axis::default()
        .title(chart.unit)
        .style(axis_style)
        .bounds(chart.y_bounds)
        .labels(y_labels(chart).into_iter().map(Span::from).collect::<Vec<_>>());

    let widget = Chart::new(datasets)
        .block(chart_block(app, chart.kind.title()))
        .x_axis(x_axis)
        .y_axis(y_axis)
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    frame.render_widget(widget, area);
}
