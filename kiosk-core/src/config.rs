use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::KioskError;

/// Fixed path the launcher reads its kiosk configuration from when the
/// settings file does not override it.
pub const DEFAULT_CONFIG_PATH: &str = "/usr/local/etc/kiosk/config.json";

/// Parsed representation of the external configuration file.
///
/// Produced once at startup and immutable for the process lifetime. The file
/// is a JSON object with at least the required `url` field; unknown fields
/// are ignored so operators can annotate their config freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub url: String,
}

/// The external config-loading collaborator.
///
/// Absence (`None`) is a valid terminal state distinct from a populated
/// record: the controller shows the missing-config error page and schedules
/// no retry, because no URL is known to retry.
pub trait ConfigSource {
    fn load(&self) -> Option<ConfigRecord>;
}

/// Reads the kiosk configuration from a JSON file at a fixed path.
///
/// File missing, unreadable, and unparseable are treated identically as
/// "no config"; the cause is logged and the launcher moves on.
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ConfigRecord, KioskError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| KioskError::ConfigUnavailable(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| KioskError::ConfigUnavailable(format!("{}: {}", self.path.display(), e)))
    }
}

impl Default for FileConfigSource {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Option<ConfigRecord> {
        match self.read() {
            Ok(record) => {
                tracing::info!(path = %self.path.display(), url = %record.url, "kiosk config loaded");
                Some(record)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_record_from_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"url": "https://example.test"}"#);

        let record = FileConfigSource::new(path).load().unwrap();
        assert_eq!(record.url, "https://example.test");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{"url": "https://example.test", "comment": "lobby display"}"#,
        );

        let record = FileConfigSource::new(path).load().unwrap();
        assert_eq!(record.url, "https://example.test");
    }

    #[test]
    fn missing_file_is_no_config() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileConfigSource::new(dir.path().join("does-not-exist.json"));
        assert!(source.load().is_none());
    }

    #[test]
    fn malformed_json_is_no_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "{ not json");
        assert!(FileConfigSource::new(path).load().is_none());
    }

    #[test]
    fn missing_url_field_is_no_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"name": "lobby"}"#);
        assert!(FileConfigSource::new(path).load().is_none());
    }

    #[test]
    fn default_source_points_at_fixed_path() {
        let source = FileConfigSource::default();
        assert_eq!(source.path(), Path::new(DEFAULT_CONFIG_PATH));
    }
}
