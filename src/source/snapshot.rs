//! Snapshot types for the weather station API.
//!
//! [`Snapshot`] is the canonical in-memory form: one current reading, named
//! 24-hour series, and per-month temperature aggregates, always in metric
//! units. The JSON document served by the station uses a row-oriented
//! envelope; decoding goes through [`WireResponse`], which also accepts the
//! older shapes the API has served over time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::units::MeasurementKind;

/// Current major version of the snapshot schema.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema version information embedded in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version - breaking changes increment this.
    pub major: u32,
    /// Minor version - backwards-compatible additions increment this.
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The current schema version used by this crate.
    pub const fn current() -> Self {
        Self {
            major: SCHEMA_VERSION,
            minor: 0,
        }
    }

    /// Returns true if the major version matches (minor differences are OK).
    pub fn is_compatible(&self) -> bool {
        self.major == SCHEMA_VERSION
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Raised when a document declares a schema this crate cannot read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported snapshot schema version {found} (expected major {})", SCHEMA_VERSION)]
pub struct IncompatibleSchema {
    pub found: SchemaVersion,
}

/// A single timestamped value in a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// The measured value, absent when the station reported nothing.
    pub value: Option<f64>,
}

impl MeasurementPoint {
    pub const fn new(timestamp: i64, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// A copy of this point carrying a different value.
    pub fn with_value(self, value: Option<f64>) -> Self {
        Self { value, ..self }
    }
}

/// The most recent reading from the station.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherReading {
    pub timestamp: Option<i64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dewpoint: Option<f64>,
    pub pressure: Option<f64>,
}

impl WeatherReading {
    /// The value recorded for a measurement kind.
    pub fn value(&self, kind: MeasurementKind) -> Option<f64> {
        match kind {
            MeasurementKind::Temperature => self.temperature,
            MeasurementKind::DewPoint => self.dewpoint,
            MeasurementKind::Humidity => self.humidity,
            MeasurementKind::Pressure => self.pressure,
        }
    }
}

/// Named series covering the previous 24 hours.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalSeries {
    pub temperature: Vec<MeasurementPoint>,
    pub humidity: Vec<MeasurementPoint>,
    pub pressure: Vec<MeasurementPoint>,
    pub dewpoint: Vec<MeasurementPoint>,
}

impl HistoricalSeries {
    /// The series holding a measurement kind.
    pub fn series(&self, kind: MeasurementKind) -> &[MeasurementPoint] {
        match kind {
            MeasurementKind::Temperature => &self.temperature,
            MeasurementKind::DewPoint => &self.dewpoint,
            MeasurementKind::Humidity => &self.humidity,
            MeasurementKind::Pressure => &self.pressure,
        }
    }

    /// Returns true if no series holds any point.
    pub fn is_empty(&self) -> bool {
        MeasurementKind::ALL.iter().all(|kind| self.series(*kind).is_empty())
    }

    /// Split row-oriented readings into one series per measurement.
    fn from_rows(rows: Vec<WireRow>) -> Self {
        let mut series = Self::default();
        for row in rows {
            series.temperature.push(MeasurementPoint::new(row.timestamp, row.temperature));
            series.humidity.push(MeasurementPoint::new(row.timestamp, row.humidity));
            series.pressure.push(MeasurementPoint::new(row.timestamp, row.pressure));
            series.dewpoint.push(MeasurementPoint::new(row.timestamp, row.dewpoint));
        }
        series
    }
}

/// Temperature aggregates for one calendar month.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnualSummary {
    /// Month of the year, `0` for January through `11` for December.
    pub month_index: u32,
    pub max: Option<f64>,
    pub max_timestamp: Option<i64>,
    pub min: Option<f64>,
    pub min_timestamp: Option<i64>,
    pub avg: Option<f64>,
}

/// One weather payload: current reading, past 24 hours, and annual summary.
///
/// Values are metric at rest. Display copies for other unit systems are
/// produced by [`crate::data::transform::apply_unit_conversion`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "WireResponse", into = "WireResponse")]
pub struct Snapshot {
    pub version: SchemaVersion,
    pub current: WeatherReading,
    pub past_24h: HistoricalSeries,
    pub annual: Vec<AnnualSummary>,
}

impl Snapshot {
    /// Returns true if the snapshot carries no readings at all.
    pub fn is_empty(&self) -> bool {
        self.current == WeatherReading::default()
            && self.past_24h.is_empty()
            && self.annual.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// The JSON envelope served by the station API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default)]
    pub version: SchemaVersion,
    pub data: WireData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireData {
    pub current: WeatherReading,
    pub past_24h: WirePast,
    pub annual_temperatures: Vec<WireAnnual>,
}

/// The 24-hour history, either as rows (current API) or named series (older
/// API revisions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePast {
    Rows(Vec<WireRow>),
    Series(HistoricalSeries),
}

impl Default for WirePast {
    fn default() -> Self {
        WirePast::Rows(Vec::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRow {
    pub timestamp: i64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dewpoint: Option<f64>,
    pub pressure: Option<f64>,
}

/// An annual entry, in the current nested shape or the flat legacy shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAnnual {
    Nested(WireAnnualEntry),
    Legacy(LegacyAnnualEntry),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAnnualEntry {
    pub month_index: u32,
    #[serde(default)]
    pub temperature: WireAnnualTemperature,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireAnnualTemperature {
    pub max: Option<f64>,
    pub max_timestamp: Option<i64>,
    pub min: Option<f64>,
    pub min_timestamp: Option<i64>,
    pub avg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyAnnualEntry {
    pub month_index: u32,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl From<WireAnnual> for AnnualSummary {
    fn from(entry: WireAnnual) -> Self {
        match entry {
            WireAnnual::Nested(e) => AnnualSummary {
                month_index: e.month_index,
                max: e.temperature.max,
                max_timestamp: e.temperature.max_timestamp,
                min: e.temperature.min,
                min_timestamp: e.temperature.min_timestamp,
                avg: e.temperature.avg,
            },
            WireAnnual::Legacy(e) => AnnualSummary {
                month_index: e.month_index,
                max: e.max,
                min: e.min,
                ..Default::default()
            },
        }
    }
}

impl From<AnnualSummary> for WireAnnual {
    fn from(entry: AnnualSummary) -> Self {
        WireAnnual::Nested(WireAnnualEntry {
            month_index: entry.month_index,
            temperature: WireAnnualTemperature {
                max: entry.max,
                max_timestamp: entry.max_timestamp,
                min: entry.min,
                min_timestamp: entry.min_timestamp,
                avg: entry.avg,
            },
        })
    }
}

impl TryFrom<WireResponse> for Snapshot {
    type Error = IncompatibleSchema;

    fn try_from(response: WireResponse) -> Result<Self, Self::Error> {
        if !response.version.is_compatible() {
            return Err(IncompatibleSchema {
                found: response.version,
            });
        }

        let data = response.data;
        let past_24h = match data.past_24h {
            WirePast::Rows(rows) => HistoricalSeries::from_rows(rows),
            WirePast::Series(series) => series,
        };

        Ok(Snapshot {
            version: response.version,
            current: data.current,
            past_24h,
            annual: data.annual_temperatures.into_iter().map(AnnualSummary::from).collect(),
        })
    }
}

impl From<Snapshot> for WireResponse {
    fn from(snapshot: Snapshot) -> Self {
        WireResponse {
            code: None,
            version: snapshot.version,
            data: WireData {
                current: snapshot.current,
                past_24h: WirePast::Series(snapshot.past_24h),
                annual_temperatures: snapshot.annual.into_iter().map(WireAnnual::from).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "code": 200,
            "data": {
                "current": {
                    "timestamp": 1736108100,
                    "temperature": 4.2,
                    "humidity": 71,
                    "dewpoint": -0.6,
                    "pressure": 1013.25
                },
                "past_24h": [
                    { "timestamp": 1736100000, "temperature": 3.0, "humidity": 70, "dewpoint": -1.0, "pressure": 1012.0 },
                    { "timestamp": 1736100300, "temperature": null, "humidity": 72, "pressure": 1012.5 }
                ],
                "annual_temperatures": [
                    {
                        "monthIndex": 0,
                        "temperature": {
                            "max": 12.1, "maxTimestamp": 1735800000,
                            "min": -9.3, "minTimestamp": 1735900000,
                            "avg": 1.4
                        }
                    }
                ]
            }
        }"#
    }

    #[test]
    fn test_deserialize_snapshot() {
        let snapshot: Snapshot = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(snapshot.version, SchemaVersion::current());
        assert_eq!(snapshot.current.timestamp, Some(1736108100));
        assert_eq!(snapshot.current.pressure, Some(1013.25));

        assert_eq!(snapshot.past_24h.temperature.len(), 2);
        assert_eq!(snapshot.past_24h.temperature[1], MeasurementPoint::new(1736100300, None));
        assert_eq!(snapshot.past_24h.humidity[1].value, Some(72.0));
        assert_eq!(snapshot.past_24h.dewpoint[1].value, None);

        let january = &snapshot.annual[0];
        assert_eq!(january.month_index, 0);
        assert_eq!(january.max, Some(12.1));
        assert_eq!(january.min_timestamp, Some(1735900000));
        assert_eq!(january.avg, Some(1.4));
    }

    #[test]
    fn test_deserialize_named_series_history() {
        let json = r#"{
            "data": {
                "current": {},
                "past_24h": {
                    "temperature": [ { "timestamp": 1, "value": 5.0 }, { "timestamp": 2, "value": null } ],
                    "pressure": [ { "timestamp": 1, "value": 1000.0 } ]
                },
                "annual_temperatures": []
            }
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.past_24h.temperature.len(), 2);
        assert_eq!(snapshot.past_24h.temperature[1].value, None);
        assert_eq!(snapshot.past_24h.pressure.len(), 1);
        assert!(snapshot.past_24h.humidity.is_empty());
    }

    #[test]
    fn test_deserialize_legacy_annual_entry() {
        let json = r#"{
            "data": {
                "annual_temperatures": [ { "month_index": 6, "max": 31.5, "min": 18.0 } ]
            }
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let july = &snapshot.annual[0];
        assert_eq!(july.month_index, 6);
        assert_eq!(july.max, Some(31.5));
        assert_eq!(july.min, Some(18.0));
        assert_eq!(july.avg, None);
        assert_eq!(july.max_timestamp, None);
    }

    #[test]
    fn test_annual_entry_without_temperature_keeps_snapshot() {
        let json = r#"{
            "data": {
                "current": { "timestamp": 1736108100, "temperature": 4.2 },
                "past_24h": [ { "timestamp": 1736100000, "temperature": 3.0 } ],
                "annual_temperatures": [ { "monthIndex": 0 } ]
            }
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.current.temperature, Some(4.2));
        assert_eq!(snapshot.past_24h.temperature.len(), 1);

        let january = &snapshot.annual[0];
        assert_eq!(january.month_index, 0);
        assert_eq!(january.max, None);
        assert_eq!(january.min, None);
        assert_eq!(january.avg, None);
    }

    #[test]
    fn test_rejects_incompatible_version() {
        let json = r#"{ "version": { "major": 2, "minor": 0 }, "data": {} }"#;

        let err = serde_json::from_str::<Snapshot>(json).unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot schema version 2.0"));
    }

    #[test]
    fn test_serialized_snapshot_reads_back() {
        let snapshot: Snapshot = serde_json::from_str(sample_json()).unwrap();

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(Snapshot::default().is_empty());

        let snapshot: Snapshot = serde_json::from_str(sample_json()).unwrap();
        assert!(!snapshot.is_empty());
    }
}
