//! Data source abstraction for receiving station snapshots.
//!
//! This module defines the snapshot data model and a trait-based abstraction
//! over where snapshots come from (the station's HTTP endpoint or a local
//! file).

mod error;
mod file;
mod http;
mod snapshot;

pub use error::FetchError;
pub use file::FileSource;
pub use http::{fetch_snapshot, HttpSource};
pub use snapshot::{
    AnnualSummary, HistoricalSeries, IncompatibleSchema, MeasurementPoint, SchemaVersion,
    Snapshot, WeatherReading, SCHEMA_VERSION,
};

use std::fmt::Debug;

/// Trait for receiving station snapshots from various sources.
///
/// Sources are driven from the UI thread: [`request`](DataSource::request)
/// asks for fresh data, and [`poll`](DataSource::poll) picks up whatever has
/// arrived without blocking.
///
/// # Example
///
/// ```
/// use stationwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("weather.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Temperature: {:?}", snapshot.current.temperature);
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Ask the source for a fresh snapshot.
    ///
    /// The result is picked up by a later [`poll`](DataSource::poll). Sources
    /// that need no explicit request keep the default no-op.
    fn request(&mut self) {}

    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error from the most recent failed request, if any.
    fn error(&self) -> Option<&str>;
}
