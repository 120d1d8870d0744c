//! Unit systems, unit labels, and metric-to-display conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PLACEHOLDER;

/// Millibars per inch of mercury.
const MBAR_PER_INHG: f64 = 33.864;

/// Display unit system.
///
/// Readings are always stored in metric; this only selects how they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    #[default]
    Imperial,
}

impl UnitSystem {
    /// Resolve a selector value. Only `"metric"` selects metric; anything
    /// else, including no value, selects imperial.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(p) if p.eq_ignore_ascii_case("metric") => UnitSystem::Metric,
            _ => UnitSystem::Imperial,
        }
    }

    /// The other unit system.
    pub fn toggle(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of quantity measured by the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Temperature,
    DewPoint,
    Humidity,
    Pressure,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 4] = [
        MeasurementKind::Temperature,
        MeasurementKind::DewPoint,
        MeasurementKind::Humidity,
        MeasurementKind::Pressure,
    ];

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "Temperature",
            MeasurementKind::DewPoint => "Dew Point",
            MeasurementKind::Humidity => "Humidity",
            MeasurementKind::Pressure => "Pressure",
        }
    }
}

/// Unit label for a measurement kind in a unit system.
pub fn unit_label(kind: MeasurementKind, system: UnitSystem) -> &'static str {
    match (kind, system) {
        (MeasurementKind::Humidity, _) => "%",
        (MeasurementKind::Temperature | MeasurementKind::DewPoint, UnitSystem::Metric) => "°C",
        (MeasurementKind::Temperature | MeasurementKind::DewPoint, UnitSystem::Imperial) => "°F",
        (MeasurementKind::Pressure, UnitSystem::Metric) => "mbar",
        (MeasurementKind::Pressure, UnitSystem::Imperial) => "inHg",
    }
}

/// Round half up (toward positive infinity) to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

pub fn round_one_decimal(value: f64) -> f64 {
    round_to(value, 1)
}

pub fn round_two_decimals(value: f64) -> f64 {
    round_to(value, 2)
}

/// Convert a Celsius reading for display, rounded to one decimal place.
pub fn convert_temperature(celsius: f64, target: UnitSystem) -> f64 {
    match target {
        UnitSystem::Metric => round_one_decimal(celsius),
        UnitSystem::Imperial => round_one_decimal(celsius * 9.0 / 5.0 + 32.0),
    }
}

/// Convert a millibar reading for display, rounded to two decimal places.
pub fn convert_pressure(mbar: f64, target: UnitSystem) -> f64 {
    match target {
        UnitSystem::Metric => round_two_decimals(mbar),
        UnitSystem::Imperial => round_two_decimals(mbar / MBAR_PER_INHG),
    }
}

/// Convert a metric value of the given kind for display.
///
/// Humidity is the same in every unit system and is returned unchanged.
pub fn convert(kind: MeasurementKind, value: f64, target: UnitSystem) -> f64 {
    match kind {
        MeasurementKind::Temperature | MeasurementKind::DewPoint => {
            convert_temperature(value, target)
        }
        MeasurementKind::Pressure => convert_pressure(value, target),
        MeasurementKind::Humidity => value,
    }
}

/// Format a value followed by its unit label, or `"--"` when there is none.
pub fn format_with_unit(value: Option<f64>, kind: MeasurementKind, system: UnitSystem) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{}{}", v, unit_label(kind, system)),
        _ => PLACEHOLDER.to_string(),
    }
}
