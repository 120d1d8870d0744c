//! Derive display copies of a metric snapshot.
//!
//! This is the only place unit conversion runs. The input snapshot is always
//! metric and is never modified; each call builds a fully independent copy,
//! so converting the same source twice gives the same result.

use super::units::{convert, MeasurementKind, UnitSystem};
use crate::source::{AnnualSummary, HistoricalSeries, MeasurementPoint, Snapshot, WeatherReading};

/// Build a display copy of `snapshot` in `target` units.
///
/// Temperature, dew point and pressure are converted (and rounded, even for
/// metric). Humidity is copied unchanged. Returns `None` for `None`.
pub fn apply_unit_conversion(snapshot: Option<&Snapshot>, target: UnitSystem) -> Option<Snapshot> {
    let snapshot = snapshot?;

    Some(Snapshot {
        version: snapshot.version,
        current: convert_reading(&snapshot.current, target),
        past_24h: convert_series(&snapshot.past_24h, target),
        annual: snapshot.annual.iter().map(|entry| convert_annual(entry, target)).collect(),
    })
}

fn convert_value(kind: MeasurementKind, value: Option<f64>, target: UnitSystem) -> Option<f64> {
    value.map(|v| convert(kind, v, target))
}

fn convert_reading(reading: &WeatherReading, target: UnitSystem) -> WeatherReading {
    WeatherReading {
        timestamp: reading.timestamp,
        temperature: convert_value(MeasurementKind::Temperature, reading.temperature, target),
        humidity: reading.humidity,
        dewpoint: convert_value(MeasurementKind::DewPoint, reading.dewpoint, target),
        pressure: convert_value(MeasurementKind::Pressure, reading.pressure, target),
    }
}

fn convert_points(
    kind: MeasurementKind,
    points: &[MeasurementPoint],
    target: UnitSystem,
) -> Vec<MeasurementPoint> {
    points
        .iter()
        .map(|p| p.with_value(convert_value(kind, p.value, target)))
        .collect()
}

fn convert_series(series: &HistoricalSeries, target: UnitSystem) -> HistoricalSeries {
    HistoricalSeries {
        temperature: convert_points(MeasurementKind::Temperature, &series.temperature, target),
        humidity: series.humidity.clone(),
        pressure: convert_points(MeasurementKind::Pressure, &series.pressure, target),
        dewpoint: convert_points(MeasurementKind::DewPoint, &series.dewpoint, target),
    }
}

fn convert_annual(entry: &AnnualSummary, target: UnitSystem) -> AnnualSummary {
    let temperature = |v| convert_value(MeasurementKind::Temperature, v, target);
    AnnualSummary {
        max: temperature(entry.max),
        min: temperature(entry.min),
        avg: temperature(entry.avg),
        ..entry.clone()
    }
}
