//! Aggregate statistics over measurement series.
//!
//! Every function accepts an absent or unordered series and skips points
//! without a value. When nothing is left to aggregate the result is a NaN
//! sentinel rather than an error, so callers can feed it straight into
//! formatting and check [`Extreme::is_valid`] (or `f64::is_nan`) before
//! display.

use serde::Serialize;

use super::units::round_two_decimals;
use crate::source::MeasurementPoint;

/// A series extreme together with the time it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extreme {
    /// Seconds since the Unix epoch, NaN when there was no data.
    pub timestamp: f64,
    /// The extreme value, NaN when there was no data.
    pub value: f64,
}

impl Extreme {
    /// The "no valid data" sentinel.
    pub const NONE: Extreme = Extreme {
        timestamp: f64::NAN,
        value: f64::NAN,
    };

    fn at(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp: timestamp as f64,
            value,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.timestamp.is_nan() && !self.value.is_nan()
    }

    pub fn value(&self) -> Option<f64> {
        self.is_valid().then_some(self.value)
    }

    pub fn timestamp_secs(&self) -> Option<i64> {
        self.is_valid().then_some(self.timestamp as i64)
    }
}

/// Points that carry a usable value, in input order.
fn present_values(points: Option<&[MeasurementPoint]>) -> Vec<(i64, f64)> {
    points
        .unwrap_or_default()
        .iter()
        .filter_map(|p| match p.value {
            Some(v) if !v.is_nan() => Some((p.timestamp, v)),
            _ => None,
        })
        .collect()
}

/// Reduce to the point that `replaces` prefers. The incumbent wins ties, so
/// the first point encountered is kept.
fn extreme_by(points: Option<&[MeasurementPoint]>, replaces: fn(f64, f64) -> bool) -> Extreme {
    let present = present_values(points);
    if present.is_empty() {
        return Extreme::NONE;
    }

    let (timestamp, value) = present
        .into_iter()
        .reduce(|best, candidate| {
            if replaces(candidate.1, best.1) {
                candidate
            } else {
                best
            }
        })
        // present is non-empty
        .unwrap_or_else(|| unreachable!("reduction reached with no present values"));

    Extreme::at(timestamp, value)
}

/// The point with the greatest value.
pub fn max_with_timestamp(points: Option<&[MeasurementPoint]>) -> Extreme {
    extreme_by(points, |candidate, best| candidate > best)
}

/// The point with the least value.
pub fn min_with_timestamp(points: Option<&[MeasurementPoint]>) -> Extreme {
    extreme_by(points, |candidate, best| candidate < best)
}

/// Arithmetic mean of the present values, rounded to two decimal places.
pub fn average(points: Option<&[MeasurementPoint]>) -> f64 {
    let present = present_values(points);
    if present.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = present.iter().map(|(_, v)| v).sum();
    round_two_decimals(sum / present.len() as f64)
}
