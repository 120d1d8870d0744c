//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono_tz::Tz;

use crate::config::StationSettings;
use crate::data::{apply_unit_conversion, ChartKind, Dashboard, UnitSystem, DEFAULT_LOCALE};
use crate::source::{DataSource, Snapshot};
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Current conditions and 24-hour statistics.
    Current,
    /// Line charts of the past 24 hours.
    Charts,
    /// Monthly temperature extremes for the year.
    Annual,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Current => View::Charts,
            View::Charts => View::Annual,
            View::Annual => View::Current,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Current => View::Annual,
            View::Charts => View::Current,
            View::Annual => View::Charts,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Current => "Current",
            View::Charts => "Charts",
            View::Annual => "Annual",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    /// Last snapshot received, metric as fetched. Never converted in place.
    snapshot: Option<Snapshot>,
    /// Display figures for `snapshot` in `unit_system`; placeholders until
    /// the first snapshot arrives.
    pub dashboard: Dashboard,
    pub load_error: Option<String>,
    pub last_updated: Option<Instant>,

    // Display settings
    pub unit_system: UnitSystem,
    pub timezone: Tz,
    /// Locale passed to every timestamp format.
    pub locale: String,
    pub station: StationSettings,

    /// Index into [`ChartKind::ALL`] of the chart shown in the Charts view.
    pub selected_chart: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`, with the theme picked from the
    /// terminal background.
    pub fn new(
        source: Box<dyn DataSource>,
        unit_system: UnitSystem,
        timezone: Tz,
        station: StationSettings,
    ) -> Self {
        Self::with_theme(source, unit_system, timezone, station, Theme::auto_detect())
    }

    pub fn with_theme(
        source: Box<dyn DataSource>,
        unit_system: UnitSystem,
        timezone: Tz,
        station: StationSettings,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Current,
            show_help: false,
            source,
            snapshot: None,
            dashboard: Dashboard::from_snapshot(
                &Snapshot::default(),
                unit_system,
                timezone,
                DEFAULT_LOCALE,
            ),
            load_error: None,
            last_updated: None,
            unit_system,
            timezone,
            locale: DEFAULT_LOCALE.to_string(),
            station,
            selected_chart: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The metric snapshot currently displayed, if one has arrived.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Ask the source for fresh data. The result is applied by a later
    /// [`reload_data`](App::reload_data).
    pub fn refresh(&mut self) {
        tracing::debug!(source = self.source.description(), "Refreshing");
        self.source.request();
    }

    /// Poll the data source for new data.
    ///
    /// Returns true if a new snapshot replaced the displayed one. A failed
    /// request only records the error; the previous snapshot stays on screen.
    pub fn reload_data(&mut self) -> bool {
        if let Some(snapshot) = self.source.poll() {
            tracing::info!(
                timestamp = ?snapshot.current.timestamp,
                points = snapshot.past_24h.temperature.len(),
                months = snapshot.annual.len(),
                "Received station snapshot"
            );
            self.snapshot = Some(snapshot);
            self.load_error = None;
            self.last_updated = Some(Instant::now());
            self.rebuild_dashboard();
            return true;
        }

        self.load_error = self.source.error().map(str::to_string);
        false
    }

    /// Switch to the other unit system, re-deriving the display from the held
    /// snapshot without fetching again.
    pub fn toggle_units(&mut self) {
        self.set_unit_system(self.unit_system.toggle());
        self.set_status_message(format!("Units: {}", self.unit_system));
    }

    pub fn set_unit_system(&mut self, system: UnitSystem) {
        if system == self.unit_system {
            return;
        }
        self.unit_system = system;
        self.rebuild_dashboard();
    }

    pub fn set_locale(&mut self, locale: &str) {
        if locale == self.locale {
            return;
        }
        self.locale = locale.to_string();
        self.rebuild_dashboard();
    }

    fn rebuild_dashboard(&mut self) {
        let display = apply_unit_conversion(self.snapshot.as_ref(), self.unit_system)
            .unwrap_or_default();
        self.dashboard = Dashboard::from_snapshot(&display, self.unit_system, self.timezone, &self.locale);
    }

    /// Switch to the next view (cycles through Current → Charts → Annual).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// The chart shown in the Charts view.
    pub fn chart_kind(&self) -> ChartKind {
        ChartKind::ALL[self.selected_chart % ChartKind::ALL.len()]
    }

    pub fn select_next_chart(&mut self) {
        self.selected_chart = (self.selected_chart + 1) % ChartKind::ALL.len();
    }

    pub fn select_prev_chart(&mut self) {
        self.selected_chart =
            (self.selected_chart + ChartKind::ALL.len() - 1) % ChartKind::ALL.len();
    }

    /// Navigate back: close the help overlay first, then return to Current.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.current_view = View::Current;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the displayed figures to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if !self.has_data() {
            anyhow::bail!("No data to export");
        }

        let json = serde_json::to_string_pretty(&self.dashboard)?;
        std::fs::write(path, json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::time::DEFAULT_TIMEZONE;
    use crate::source::{HistoricalSeries, MeasurementPoint, WeatherReading};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Hands out queued results, one per poll after a request.
    #[derive(Debug, Default)]
    struct MockSource {
        queued: VecDeque<Result<Snapshot, String>>,
        requests: Arc<Mutex<usize>>,
        pending: bool,
        error: Option<String>,
    }

    impl DataSource for MockSource {
        fn request(&mut self) {
            *self.requests.lock().unwrap() += 1;
            self.pending = true;
        }

        fn poll(&mut self) -> Option<Snapshot> {
            if !std::mem::take(&mut self.pending) {
                return None;
            }
            match self.queued.pop_front()? {
                Ok(snapshot) => {
                    self.error = None;
                    Some(snapshot)
                }
                Err(e) => {
                    self.error = Some(e);
                    None
                }
            }
        }

        fn description(&self) -> &str {
            "mock"
        }

        fn error(&self) -> Option<&str> {
            self.error.as_deref()
        }
    }

    fn snapshot(temperature: f64) -> Snapshot {
        Snapshot {
            current: WeatherReading {
                timestamp: Some(1736108100),
                temperature: Some(temperature),
                humidity: Some(71.0),
                dewpoint: Some(-0.6),
                pressure: Some(1013.25),
            },
            past_24h: HistoricalSeries {
                temperature: vec![MeasurementPoint::new(1736100000, Some(temperature))],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn app_with(results: Vec<Result<Snapshot, String>>, system: UnitSystem) -> (App, Arc<Mutex<usize>>) {
        let source = MockSource {
            queued: results.into(),
            ..Default::default()
        };
        let requests = source.requests.clone();
        let app = App::with_theme(
            Box::new(source),
            system,
            DEFAULT_TIMEZONE,
            StationSettings::default(),
            Theme::dark(),
        );
        (app, requests)
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Current.next(), View::Charts);
        assert_eq!(View::Annual.next(), View::Current);
        assert_eq!(View::Current.prev(), View::Annual);
        assert_eq!(View::Charts.label(), "Charts");
    }

    #[test]
    fn test_placeholders_before_first_snapshot() {
        let (app, _) = app_with(vec![], UnitSystem::Imperial);

        assert!(!app.has_data());
        assert_eq!(app.dashboard.current.temperature, "--");
        assert_eq!(app.dashboard.current.as_of, "Unknown");
    }

    #[test]
    fn test_refresh_applies_snapshot() {
        let (mut app, requests) = app_with(vec![Ok(snapshot(4.2))], UnitSystem::Metric);

        assert!(!app.reload_data());
        app.refresh();
        assert!(app.reload_data());

        assert_eq!(*requests.lock().unwrap(), 1);
        assert_eq!(app.dashboard.current.temperature, "4.2°C");
        assert!(app.last_updated.is_some());
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_failed_fetch_keeps_previous_snapshot() {
        let (mut app, _) = app_with(
            vec![Ok(snapshot(4.2)), Err("Request timed out".to_string())],
            UnitSystem::Metric,
        );

        app.refresh();
        assert!(app.reload_data());
        app.refresh();
        assert!(!app.reload_data());

        assert_eq!(app.load_error.as_deref(), Some("Request timed out"));
        assert_eq!(app.dashboard.current.temperature, "4.2°C");
        assert_eq!(app.snapshot().unwrap().current.temperature, Some(4.2));
    }

    #[test]
    fn test_toggle_units_rederives_without_refetch() {
        let (mut app, requests) = app_with(vec![Ok(snapshot(4.2))], UnitSystem::Metric);
        app.refresh();
        app.reload_data();

        app.toggle_units();
        assert_eq!(app.unit_system, UnitSystem::Imperial);
        assert_eq!(app.dashboard.current.temperature, "39.6°F");
        assert_eq!(app.dashboard.current.pressure, "29.92inHg");
        assert_eq!(app.get_status_message(), Some("Units: imperial"));

        // The held snapshot stays metric, so toggling back is exact
        app.toggle_units();
        assert_eq!(app.dashboard.current.temperature, "4.2°C");
        assert_eq!(app.snapshot().unwrap().current.temperature, Some(4.2));
        assert_eq!(*requests.lock().unwrap(), 1);
    }

    #[test]
    fn test_set_locale_rebuilds_with_en_us_fallback() {
        let (mut app, requests) = app_with(vec![Ok(snapshot(4.2))], UnitSystem::Metric);
        app.refresh();
        app.reload_data();
        assert_eq!(app.locale, "en-US");

        app.set_locale("de-DE");
        assert_eq!(app.locale, "de-DE");
        assert_eq!(app.dashboard.current.as_of, "05 Jan 2025 03:15 PM");
        assert_eq!(app.dashboard.current.temperature, "4.2°C");
        assert_eq!(*requests.lock().unwrap(), 1);
    }

    #[test]
    fn test_chart_selection_wraps() {
        let (mut app, _) = app_with(vec![], UnitSystem::Imperial);

        assert_eq!(app.chart_kind(), ChartKind::Temperature);
        app.select_prev_chart();
        assert_eq!(app.chart_kind(), ChartKind::Pressure);
        app.select_next_chart();
        app.select_next_chart();
        assert_eq!(app.chart_kind(), ChartKind::Humidity);
    }

    #[test]
    fn test_go_back_closes_help_first() {
        let (mut app, _) = app_with(vec![], UnitSystem::Imperial);
        app.set_view(View::Annual);
        app.toggle_help();

        app.go_back();
        assert!(!app.show_help);
        assert_eq!(app.current_view, View::Annual);

        app.go_back();
        assert_eq!(app.current_view, View::Current);
    }

    #[test]
    fn test_export_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        let (mut app, _) = app_with(vec![Ok(snapshot(4.2))], UnitSystem::Metric);

        assert!(app.export_state(&path).is_err());

        app.refresh();
        app.reload_data();
        app.export_state(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["current"]["temperature"], "4.2°C");
        assert_eq!(json["unit_system"], "metric");
    }
}
