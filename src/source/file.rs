//! File-based data source.
//!
//! Polls a local JSON file holding a station snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{DataSource, FetchError, Snapshot};

/// A data source that reads station snapshots from a JSON file.
///
/// The file holds the same document the station's HTTP endpoint serves, for
/// example a saved response or one written by a collector script.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file once and decode it.
    pub fn load(path: &Path) -> Result<Snapshot, FetchError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read on the first poll, after a request, or when the mtime moved
    /// forward. A vanished file keeps the last snapshot on screen.
    fn needs_read(&self, modified: Option<SystemTime>) -> bool {
        match (self.last_modified, modified) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(last), Some(current)) => current > last,
        }
    }

    fn read_file(&mut self) -> Option<Snapshot> {
        match Self::load(&self.path) {
            Ok(snapshot) => {
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                let message = e.to_string();
                // Only log when the failure changes, not on every poll
                if self.last_error.as_deref() != Some(message.as_str()) {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to read snapshot file");
                }
                self.last_error = Some(message);
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn request(&mut self) {
        // Forget the last mtime so the next poll re-reads the file
        self.last_modified = None;
    }

    fn poll(&mut self) -> Option<Snapshot> {
        let modified = self.get_modified_time();
        if !self.needs_read(modified) {
            return None;
        }

        // A bad file is not read again until it changes
        self.last_modified = modified;
        self.read_file()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "code": 200,
            "data": {
                "current": { "timestamp": 1736108100, "temperature": 4.2, "humidity": 71 },
                "past_24h": [
                    { "timestamp": 1736100000, "temperature": 3.0, "pressure": 1012.0 }
                ],
                "annual_temperatures": []
            }
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/weather.json");
        assert_eq!(source.path(), Path::new("/tmp/weather.json"));
        assert_eq!(source.description(), "file: /tmp/weather.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.current.temperature, Some(4.2));
        assert_eq!(snapshot.current.pressure, None);
        assert_eq!(snapshot.past_24h.temperature.len(), 1);

        // Unchanged file yields nothing new
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_request_forces_reread() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_some());
        assert!(source.poll().is_none());

        source.request();
        assert!(source.poll().is_some());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/weather.json");

        let snapshot = source.poll();
        assert!(snapshot.is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        let snapshot = source.poll();
        assert!(snapshot.is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_unchanged_bad_file_is_read_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let mtime = std::fs::metadata(file.path()).unwrap().modified().unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));

        // Valid content under the old mtime is not picked up, so the file
        // was not read again
        std::fs::write(file.path(), sample_json()).unwrap();
        std::fs::File::options()
            .write(true)
            .open(file.path())
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        for _ in 0..10 {
            assert!(source.poll().is_none());
        }
        assert!(source.error().unwrap().contains("Parse error"));

        source.request();
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_error_clears_after_successful_read() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{").unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().is_some());

        std::fs::write(file.path(), sample_json()).unwrap();
        source.request();
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let snapshot = FileSource::load(file.path()).unwrap();
        assert_eq!(snapshot.current.humidity, Some(71.0));
    }
}
