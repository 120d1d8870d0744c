//! Timezone-aware timestamp formatting and chart axis helpers.
//!
//! The station sits at a fixed location, so every displayed time (and every
//! "start of day" boundary) is resolved in the station's IANA timezone rather
//! than UTC or the viewer's local zone.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

use super::PLACEHOLDER;

/// Timezone of the station unless configured otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// The only locale the presets are defined for.
pub const DEFAULT_LOCALE: &str = "en-US";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Named output shapes for [`format_epoch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPreset {
    /// `05 Jan 2025 03:15 PM`
    #[default]
    Full,
    /// `15:15`
    Time24h,
    /// `05 Jan`
    DayMonth,
    /// `05 Jan 15:15`
    DayMonth24hTime,
}

impl FormatPreset {
    fn pattern(self) -> &'static str {
        match self {
            FormatPreset::Full => "%d %b %Y %I:%M %p",
            FormatPreset::Time24h => "%H:%M",
            FormatPreset::DayMonth => "%d %b",
            FormatPreset::DayMonth24hTime => "%d %b %H:%M",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatPreset::Full => "full",
            FormatPreset::Time24h => "24hTime",
            FormatPreset::DayMonth => "dayMonth",
            FormatPreset::DayMonth24hTime => "dayMonth24hTime",
        }
    }
}

impl fmt::Display for FormatPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(FormatPreset::Full),
            "24hTime" => Ok(FormatPreset::Time24h),
            "dayMonth" => Ok(FormatPreset::DayMonth),
            "dayMonth24hTime" => Ok(FormatPreset::DayMonth24hTime),
            other => Err(anyhow!("Unknown format preset: {}", other)),
        }
    }
}

/// Format epoch seconds in `tz` using a preset.
///
/// Returns `"--"` for an absent, zero, or out-of-range timestamp.
pub fn format_epoch(epoch: Option<i64>, preset: FormatPreset, tz: Tz, locale: &str) -> String {
    if locale != DEFAULT_LOCALE {
        tracing::debug!(locale, "Unsupported locale, formatting as {}", DEFAULT_LOCALE);
    }

    let Some(local) = to_local(epoch, tz) else {
        return PLACEHOLDER.to_string();
    };

    local.format(preset.pattern()).to_string()
}

fn to_local(epoch: Option<i64>, tz: Tz) -> Option<DateTime<Tz>> {
    let secs = epoch.filter(|&s| s != 0)?;
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&tz))
}

/// Epoch seconds of local midnight of the day containing `epoch` in `tz`.
pub fn start_of_day(epoch: i64, tz: Tz) -> Option<i64> {
    let local = DateTime::from_timestamp(epoch, 0)?.with_timezone(&tz);
    let midnight = local.date_naive().and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight).earliest().map(|dt| dt.timestamp())
}

/// Full English month name for a zero-based month index.
pub fn month_name(index: u32) -> Option<&'static str> {
    MONTH_NAMES.get(index as usize).copied()
}

/// Parse an IANA timezone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow!("Invalid timezone '{}': {}", name, e))
}

/// Which way to round an axis bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Round outward to a multiple of five: down for lower bounds, up for upper
/// bounds.
pub fn round_to_multiple_of_5(value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Up => (value / 5.0).ceil() * 5.0,
        Direction::Down => (value / 5.0).floor() * 5.0,
    }
}
