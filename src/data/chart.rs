//! Chart preparation for the 24-hour line charts.
//!
//! Turns a display snapshot into sorted plot lines, padded y-axis bounds,
//! and reference lines (start of the station's day, freezing point).

use chrono_tz::Tz;
use serde::Serialize;

use super::stats::{max_with_timestamp, min_with_timestamp};
use super::time::{
    format_epoch, round_to_multiple_of_5, start_of_day, Direction, FormatPreset,
};
use super::units::{unit_label, MeasurementKind, UnitSystem};
use crate::source::{MeasurementPoint, Snapshot};

/// Which of the three dashboard charts to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Temperature,
    Humidity,
    Pressure,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Temperature, ChartKind::Humidity, ChartKind::Pressure];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Temperature => "Temperature Past 24 Hours",
            ChartKind::Humidity => "Relative Humidity Past 24 Hours",
            ChartKind::Pressure => "Station Level Pressure Past 24 Hours",
        }
    }

    /// The measurement that sets the chart's unit.
    pub fn primary(&self) -> MeasurementKind {
        match self {
            ChartKind::Temperature => MeasurementKind::Temperature,
            ChartKind::Humidity => MeasurementKind::Humidity,
            ChartKind::Pressure => MeasurementKind::Pressure,
        }
    }

    /// Lines drawn on the chart. Temperature is shown with its dew point.
    pub fn series(&self) -> &'static [MeasurementKind] {
        match self {
            ChartKind::Temperature => &[MeasurementKind::Temperature, MeasurementKind::DewPoint],
            ChartKind::Humidity => &[MeasurementKind::Humidity],
            ChartKind::Pressure => &[MeasurementKind::Pressure],
        }
    }
}

/// One plotted series, sorted by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLine {
    pub kind: MeasurementKind,
    pub points: Vec<MeasurementPoint>,
}

impl ChartLine {
    /// `(x, y)` pairs for plotting; points without a value are skipped so the
    /// line connects across gaps.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value.filter(|v| !v.is_nan()).map(|v| (p.timestamp as f64, v)))
            .collect()
    }
}

/// A guide line drawn across the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "axis", rename_all = "lowercase")]
pub enum ReferenceLine {
    /// A vertical line at a timestamp, e.g. midnight of the current day.
    Vertical { x: f64, label: String },
    /// A horizontal line at a value, e.g. freezing.
    Horizontal { y: f64 },
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub unit: &'static str,
    pub lines: Vec<ChartLine>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl ChartData {
    /// Build a chart from a display snapshot (already converted to `system`).
    pub fn build(
        kind: ChartKind,
        snapshot: &Snapshot,
        system: UnitSystem,
        tz: Tz,
        locale: &str,
    ) -> Self {
        let lines: Vec<ChartLine> = kind
            .series()
            .iter()
            .map(|&series_kind| ChartLine {
                kind: series_kind,
                points: sorted(snapshot.past_24h.series(series_kind)),
            })
            .collect();

        let x_bounds = x_bounds(&lines);
        let y_bounds = y_bounds(kind, &lines, system);
        let x_labels = x_labels(x_bounds, tz, locale, !lines.iter().all(|l| l.points.is_empty()));
        let reference_lines = reference_lines(kind, &lines, system, tz, locale);

        Self {
            kind,
            unit: unit_label(kind.primary(), system),
            lines,
            x_bounds,
            y_bounds,
            x_labels,
            reference_lines,
        }
    }

    pub fn line(&self, kind: MeasurementKind) -> Option<&ChartLine> {
        self.lines.iter().find(|l| l.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.plot_points().is_empty())
    }
}

/// Sorted copy of a series; the source order is left alone.
fn sorted(points: &[MeasurementPoint]) -> Vec<MeasurementPoint> {
    let mut points = points.to_vec();
    points.sort_by_key(|p| p.timestamp);
    points
}

fn x_bounds(lines: &[ChartLine]) -> [f64; 2] {
    let timestamps = lines.iter().flat_map(|l| l.points.iter().map(|p| p.timestamp));
    let (min, max) = timestamps.fold((i64::MAX, i64::MIN), |(lo, hi), t| (lo.min(t), hi.max(t)));
    if min > max {
        return [0.0, 1.0];
    }
    if min == max {
        return [min as f64 - 1.0, max as f64 + 1.0];
    }
    [min as f64, max as f64]
}

fn y_bounds(kind: ChartKind, lines: &[ChartLine], system: UnitSystem) -> [f64; 2] {
    let series = |k: MeasurementKind| lines.iter().find(|l| l.kind == k).map(|l| l.points.as_slice());

    let padded = match kind {
        ChartKind::Temperature => {
            let low = min_with_timestamp(series(MeasurementKind::DewPoint));
            let high = max_with_timestamp(series(MeasurementKind::Temperature));
            low.value().zip(high.value()).map(|(low, high)| {
                [
                    round_to_multiple_of_5(low - 1.0, Direction::Down),
                    round_to_multiple_of_5(high + 1.0, Direction::Up),
                ]
            })
        }
        ChartKind::Pressure => {
            let pressure = series(MeasurementKind::Pressure);
            let low = min_with_timestamp(pressure);
            let high = max_with_timestamp(pressure);
            low.value().zip(high.value()).map(|(low, high)| match system {
                UnitSystem::Metric => [
                    round_to_multiple_of_5(low - 1.0, Direction::Down),
                    round_to_multiple_of_5(high + 1.0, Direction::Up),
                ],
                // inHg varies by fractions; anchor a narrow window on the high
                UnitSystem::Imperial => [high - 0.1, high + 0.1],
            })
        }
        ChartKind::Humidity => Some([0.0, 100.0]),
    };

    padded.unwrap_or_else(|| data_range(lines))
}

/// Min and max over every plotted value.
fn data_range(lines: &[ChartLine]) -> [f64; 2] {
    let values = lines.iter().flat_map(|l| l.plot_points()).map(|(_, y)| y);
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        [0.0, 1.0]
    } else if min == max {
        [min - 1.0, max + 1.0]
    } else {
        [min, max]
    }
}

fn x_labels(bounds: [f64; 2], tz: Tz, locale: &str, has_data: bool) -> Vec<String> {
    if !has_data {
        return Vec::new();
    }
    let [start, end] = bounds;
    [start, (start + end) / 2.0, end]
        .iter()
        .map(|&t| format_epoch(Some(t as i64), FormatPreset::Time24h, tz, locale))
        .collect()
}

fn reference_lines(
    kind: ChartKind,
    lines: &[ChartLine],
    system: UnitSystem,
    tz: Tz,
    locale: &str,
) -> Vec<ReferenceLine> {
    let mut result = Vec::new();

    let latest = lines.iter().filter_map(|l| l.points.last()).map(|p| p.timestamp).max();
    let Some(latest) = latest else {
        return result;
    };

    if let Some(midnight) = start_of_day(latest, tz) {
        result.push(ReferenceLine::Vertical {
            x: midnight as f64,
            label: format_epoch(Some(midnight), FormatPreset::DayMonth, tz, locale),
        });
    }

    if kind == ChartKind::Temperature {
        let freezing = match system {
            UnitSystem::Metric => 0.0,
            UnitSystem::Imperial => 32.0,
        };
        result.push(ReferenceLine::Horizontal { y: freezing });
    }

    result
}
