//! # stationwatch
//!
//! A terminal dashboard and library for a personal weather station.
//!
//! The station's API serves one JSON snapshot: the current reading, the past
//! 24 hours of readings, and monthly temperature extremes for the year, all in
//! metric units. This crate fetches that snapshot, converts it for display in
//! metric or imperial units, and renders current conditions, line charts and
//! an annual table in an interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(display) │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource                    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, unit toggling
//! - **[`source`]**: The [`Snapshot`] model and the [`DataSource`] trait with
//!   HTTP and file implementations
//! - **[`data`]**: Unit conversion, statistics, timestamp formatting, and the
//!   display-ready [`Dashboard`]
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (file, environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the station endpoint, refreshing every 5 minutes
//! stationwatch --url https://station.example.com/weather
//!
//! # Show a saved snapshot in metric units
//! stationwatch --file weather.json --units metric
//!
//! # Write the computed figures as JSON and exit
//! stationwatch --url https://station.example.com/weather --export weather_export.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use stationwatch::{apply_unit_conversion, Dashboard, Snapshot, UnitSystem, DEFAULT_LOCALE, DEFAULT_TIMEZONE};
//!
//! let json = r#"{"code":200,"data":{"current":{"timestamp":1736108100,"temperature":4.2},
//!               "past_24h":[],"annual_temperatures":[]}}"#;
//! let snapshot: Snapshot = serde_json::from_str(json).unwrap();
//!
//! let display = apply_unit_conversion(Some(&snapshot), UnitSystem::Imperial).unwrap();
//! let dashboard = Dashboard::from_snapshot(&display, UnitSystem::Imperial, DEFAULT_TIMEZONE, DEFAULT_LOCALE);
//! assert_eq!(dashboard.current.temperature, "39.6°F");
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::Settings;
pub use data::{
    apply_unit_conversion, ChartData, ChartKind, Dashboard, MeasurementKind, UnitSystem,
    DEFAULT_LOCALE, DEFAULT_TIMEZONE,
};
pub use source::{
    AnnualSummary, DataSource, FetchError, FileSource, HistoricalSeries, HttpSource,
    MeasurementPoint, Snapshot, WeatherReading,
};
