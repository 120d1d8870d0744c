//! Display-ready figures for the dashboard.
//!
//! A [`Dashboard`] is computed once per display cycle from a converted
//! snapshot, so rendering never touches raw readings.

use chrono_tz::Tz;
use serde::Serialize;

use super::chart::{ChartData, ChartKind};
use super::stats::{average, max_with_timestamp, min_with_timestamp, Extreme};
use super::time::{format_epoch, month_name, FormatPreset};
use super::units::{format_with_unit, round_one_decimal, MeasurementKind, UnitSystem};
use crate::source::{AnnualSummary, Snapshot};

/// Shown in place of the "as of" time before any reading has arrived.
const UNKNOWN_TIME: &str = "Unknown";

/// Current conditions, formatted with units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub as_of: String,
    pub temperature: String,
    pub dewpoint: String,
    pub humidity: String,
    pub pressure: String,
}

/// A formatted extreme and when it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeFigure {
    pub value: String,
    pub at: String,
}

impl ExtremeFigure {
    fn new(extreme: Extreme, kind: MeasurementKind, system: UnitSystem, tz: Tz, locale: &str) -> Self {
        Self {
            value: format_with_unit(extreme.value(), kind, system),
            at: format_epoch(extreme.timestamp_secs(), FormatPreset::DayMonth24hTime, tz, locale),
        }
    }
}

/// Statistics over the past 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub max_temperature: ExtremeFigure,
    pub min_temperature: ExtremeFigure,
    pub avg_humidity: String,
    pub avg_pressure: String,
}

/// One row of the annual temperature table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualRow {
    pub month: String,
    pub high: ExtremeFigure,
    pub low: ExtremeFigure,
    pub average: String,
}

impl AnnualRow {
    fn new(entry: &AnnualSummary, system: UnitSystem, tz: Tz, locale: &str) -> Self {
        let figure = |value: Option<f64>, at: Option<i64>| ExtremeFigure {
            value: format_with_unit(value, MeasurementKind::Temperature, system),
            at: format_epoch(at, FormatPreset::DayMonth, tz, locale),
        };

        Self {
            month: month_name(entry.month_index)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Month {}", entry.month_index)),
            high: figure(entry.max, entry.max_timestamp),
            low: figure(entry.min, entry.min_timestamp),
            average: format_with_unit(entry.avg, MeasurementKind::Temperature, system),
        }
    }
}

/// All figures shown by the dashboard for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub unit_system: UnitSystem,
    pub timezone: String,
    pub current: CurrentConditions,
    pub daily: DailyStats,
    pub annual: Vec<AnnualRow>,
    #[serde(skip)]
    pub charts: Vec<ChartData>,
}

impl Dashboard {
    /// Compute the dashboard from a snapshot already converted to `system`.
    pub fn from_snapshot(snapshot: &Snapshot, system: UnitSystem, tz: Tz, locale: &str) -> Self {
        let reading = &snapshot.current;
        let series = &snapshot.past_24h;

        let current = CurrentConditions {
            as_of: match reading.timestamp {
                Some(_) => format_epoch(reading.timestamp, FormatPreset::Full, tz, locale),
                None => UNKNOWN_TIME.to_string(),
            },
            temperature: format_with_unit(reading.temperature, MeasurementKind::Temperature, system),
            dewpoint: format_with_unit(reading.dewpoint, MeasurementKind::DewPoint, system),
            humidity: format_with_unit(reading.humidity, MeasurementKind::Humidity, system),
            pressure: format_with_unit(reading.pressure, MeasurementKind::Pressure, system),
        };

        let temperature = Some(series.temperature.as_slice());
        let avg_humidity = round_one_decimal(average(Some(series.humidity.as_slice())));
        let avg_pressure = average(Some(series.pressure.as_slice()));

        let daily = DailyStats {
            max_temperature: ExtremeFigure::new(
                max_with_timestamp(temperature),
                MeasurementKind::Temperature,
                system,
                tz,
                locale,
            ),
            min_temperature: ExtremeFigure::new(
                min_with_timestamp(temperature),
                MeasurementKind::Temperature,
                system,
                tz,
                locale,
            ),
            avg_humidity: format_with_unit(Some(avg_humidity), MeasurementKind::Humidity, system),
            avg_pressure: format_with_unit(Some(avg_pressure), MeasurementKind::Pressure, system),
        };

        let annual = snapshot.annual.iter().map(|e| AnnualRow::new(e, system, tz, locale)).collect();

        let charts = ChartKind::ALL
            .iter()
            .map(|&kind| ChartData::build(kind, snapshot, system, tz, locale))
            .collect();

        Self {
            unit_system: system,
            timezone: tz.name().to_string(),
            current,
            daily,
            annual,
            charts,
        }
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&ChartData> {
        self.charts.iter().find(|c| c.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::time::{DEFAULT_LOCALE, DEFAULT_TIMEZONE};
    use crate::data::transform::apply_unit_conversion;
    use crate::source::{HistoricalSeries, MeasurementPoint, WeatherReading};

    fn metric_snapshot() -> Snapshot {
        Snapshot {
            current: WeatherReading {
                timestamp: Some(1736108100),
                temperature: Some(4.2),
                humidity: Some(71.0),
                dewpoint: Some(-0.6),
                pressure: Some(1013.25),
            },
            past_24h: HistoricalSeries {
                temperature: vec![
                    MeasurementPoint::new(1736100000, Some(3.0)),
                    MeasurementPoint::new(1736103600, Some(5.0)),
                    MeasurementPoint::new(1736107200, Some(-1.0)),
                ],
                humidity: vec![
                    MeasurementPoint::new(1736100000, Some(70.0)),
                    MeasurementPoint::new(1736103600, Some(71.0)),
                    MeasurementPoint::new(1736107200, Some(71.0)),
                ],
                pressure: vec![
                    MeasurementPoint::new(1736100000, Some(1012.0)),
                    MeasurementPoint::new(1736103600, Some(1014.0)),
                ],
                dewpoint: vec![],
            },
            annual: vec![AnnualSummary {
                month_index: 0,
                max: Some(12.0),
                max_timestamp: Some(1736100000),
                min: Some(-10.0),
                min_timestamp: None,
                avg: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_metric_dashboard() {
        let dashboard = Dashboard::from_snapshot(&metric_snapshot(), UnitSystem::Metric, DEFAULT_TIMEZONE, DEFAULT_LOCALE);

        assert_eq!(dashboard.timezone, "America/New_York");
        assert_eq!(dashboard.current.as_of, "05 Jan 2025 03:15 PM");
        assert_eq!(dashboard.current.temperature, "4.2°C");
        assert_eq!(dashboard.current.dewpoint, "-0.6°C");
        assert_eq!(dashboard.current.humidity, "71%");
        assert_eq!(dashboard.current.pressure, "1013.25mbar");

        assert_eq!(dashboard.daily.max_temperature.value, "5°C");
        assert_eq!(dashboard.daily.max_temperature.at, "05 Jan 14:00");
        assert_eq!(dashboard.daily.min_temperature.value, "-1°C");
        assert_eq!(dashboard.daily.min_temperature.at, "05 Jan 15:00");
        assert_eq!(dashboard.daily.avg_humidity, "70.7%");
        assert_eq!(dashboard.daily.avg_pressure, "1013mbar");
        assert_eq!(dashboard.charts.len(), 3);
    }

    #[test]
    fn test_imperial_dashboard_from_converted_snapshot() {
        let source = metric_snapshot();
        let display = apply_unit_conversion(Some(&source), UnitSystem::Imperial).unwrap();
        let dashboard = Dashboard::from_snapshot(&display, UnitSystem::Imperial, DEFAULT_TIMEZONE, DEFAULT_LOCALE);

        assert_eq!(dashboard.current.temperature, "39.6°F");
        assert_eq!(dashboard.current.pressure, "29.92inHg");
        assert_eq!(dashboard.daily.max_temperature.value, "41°F");
        assert_eq!(dashboard.daily.min_temperature.value, "30.2°F");
        assert_eq!(dashboard.daily.avg_humidity, "70.7%");
    }

    #[test]
    fn test_annual_rows() {
        let dashboard = Dashboard::from_snapshot(&metric_snapshot(), UnitSystem::Metric, DEFAULT_TIMEZONE, DEFAULT_LOCALE);

        let january = &dashboard.annual[0];
        assert_eq!(january.month, "January");
        assert_eq!(january.high.value, "12°C");
        assert_eq!(january.high.at, "05 Jan");
        assert_eq!(january.low.value, "-10°C");
        assert_eq!(january.low.at, "--");
        assert_eq!(january.average, "--");
    }

    #[test]
    fn test_empty_snapshot_shows_placeholders() {
        let dashboard = Dashboard::from_snapshot(&Snapshot::default(), UnitSystem::Imperial, DEFAULT_TIMEZONE, DEFAULT_LOCALE);

        assert_eq!(dashboard.current.as_of, "Unknown");
        assert_eq!(dashboard.current.temperature, "--");
        assert_eq!(dashboard.daily.max_temperature.value, "--");
        assert_eq!(dashboard.daily.max_temperature.at, "--");
        assert_eq!(dashboard.daily.avg_humidity, "--");
        assert_eq!(dashboard.daily.avg_pressure, "--");
        assert!(dashboard.annual.is_empty());
    }

    #[test]
    fn test_export_omits_charts() {
        let dashboard = Dashboard::from_snapshot(&metric_snapshot(), UnitSystem::Metric, DEFAULT_TIMEZONE, DEFAULT_LOCALE);
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["unit_system"], "metric");
        assert_eq!(json["daily"]["max_temperature"]["value"], "5°C");
        assert!(json.get("charts").is_none());
    }
}
