//! Layered settings for the dashboard.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, `STATIONWATCH_*` environment variables, and finally the command
//! line (applied by the binary).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "stationwatch";

/// Prefix for environment overrides, e.g. `STATIONWATCH_URL`. Nested keys
/// use a double underscore: `STATIONWATCH_STATION__NAME`.
pub const ENV_PREFIX: &str = "STATIONWATCH";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StationSettings {
    pub name: String,
    pub location: Option<String>,
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            name: "Personal Weather Station".to_string(),
            location: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Endpoint serving the station snapshot.
    pub url: Option<String>,
    /// Local snapshot file, used instead of `url` when set.
    pub file: Option<PathBuf>,
    /// `metric` or `imperial`; anything else means imperial.
    pub units: Option<String>,
    /// IANA timezone used for every displayed time.
    pub timezone: String,
    pub locale: String,
    /// Seconds between automatic refreshes.
    pub refresh_secs: u64,
    pub log_file: PathBuf,
    pub station: StationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            units: None,
            timezone: "America/New_York".to_string(),
            locale: crate::data::time::DEFAULT_LOCALE.to_string(),
            refresh_secs: 300,
            log_file: PathBuf::from("stationwatch.log"),
            station: StationSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (required to exist) or, when `None`, from an
    /// optional `stationwatch.toml` in the working directory.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Settings::load), reading overrides from `vars` instead of
    /// the process environment when given.
    fn load_with_env(
        path: Option<&Path>,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(environment(vars))
            .build()?
            .try_deserialize()
    }
}

fn environment(vars: Option<Map<String, String>>) -> Environment {
    // The prefix takes a single underscore even though nesting uses two
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .source(vars)
}
