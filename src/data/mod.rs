//! Data processing for weather snapshots.
//!
//! This module turns a metric [`Snapshot`](crate::source::Snapshot) into
//! display-ready figures.
//!
//! ## Submodules
//!
//! - [`units`]: Unit systems, labels, and metric-to-display conversion
//! - [`stats`]: Min/max with timestamp and averages over a series
//! - [`time`]: Timezone-aware timestamp presets and axis rounding
//! - [`transform`]: Converts a whole snapshot for a unit system
//! - [`chart`]: Sorted plot lines, axis bounds, and reference lines
//! - [`dashboard`]: All figures the UI displays ([`Dashboard`])
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (metric, as fetched)
//!        │
//!        ▼
//! transform::apply_unit_conversion()
//!        │
//!        ▼
//! Snapshot (display units)
//!        │
//!        ▼
//! Dashboard::from_snapshot() ──▶ stats, time, chart
//! ```

pub mod chart;
pub mod dashboard;
pub mod stats;
pub mod time;
pub mod transform;
pub mod units;

pub use chart::{ChartData, ChartKind, ChartLine, ReferenceLine};
pub use dashboard::{AnnualRow, CurrentConditions, DailyStats, Dashboard, ExtremeFigure};
pub use stats::{average, max_with_timestamp, min_with_timestamp, Extreme};
pub use time::{format_epoch, round_to_multiple_of_5, Direction, FormatPreset, DEFAULT_LOCALE, DEFAULT_TIMEZONE};
pub use transform::apply_unit_conversion;
pub use units::{convert_pressure, convert_temperature, format_with_unit, unit_label, MeasurementKind, UnitSystem};

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "--";
