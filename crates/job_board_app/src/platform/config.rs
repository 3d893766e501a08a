//! RON configuration for the job board binary.
//!
//! Every field has a default, so a missing file or a partial file both work.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use job_board_core::{HeadingRule, Layout};
use job_board_engine::FetchSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "job_board.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Feed location: an http(s) URL or a file path.
    pub source: String,
    pub layout: Layout,
    pub heading_rule: HeadingRule,
    pub output_dir: PathBuf,
    pub page_filename: String,
    pub log_destination: LogDestination,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: "scraper/jobs.json".to_string(),
            layout: Layout::default(),
            heading_rule: HeadingRule::default(),
            output_dir: PathBuf::from("output"),
            page_filename: "index.html".to_string(),
            log_destination: LogDestination::default(),
            fetch: FetchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
        }
    }
}

impl FetchConfig {
    pub fn to_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    /// Upper bound on how long the shell waits for the startup load.
    pub fn load_deadline(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs + self.request_timeout_secs + 5)
    }
}

/// A config and the file it came from, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub origin: Option<PathBuf>,
}

/// Reads `path`. A missing file is only an error when the path was given explicitly.
pub fn load(path: Option<&Path>) -> Result<LoadedConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
            return Ok(LoadedConfig {
                config: AppConfig::default(),
                origin: None,
            });
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };

    let config: AppConfig = ron::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(LoadedConfig {
        config,
        origin: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("board.ron");
        fs::write(
            &path,
            r#"(
                source: "https://example.com/jobs.json",
                layout: Collapsible,
                heading_rule: KeywordPrefix(["About", "Why"]),
                fetch: (max_bytes: 1024),
            )"#,
        )
        .unwrap();

        let loaded = load(Some(&path)).unwrap();
        let config = loaded.config;
        assert_eq!(loaded.origin, Some(path));
        assert_eq!(config.source, "https://example.com/jobs.json");
        assert_eq!(config.layout, Layout::Collapsible);
        assert_eq!(
            config.heading_rule,
            HeadingRule::KeywordPrefix(vec!["About".to_string(), "Why".to_string()])
        );
        assert_eq!(config.fetch.max_bytes, 1024);
        assert_eq!(config.fetch.request_timeout_secs, 30);
        assert_eq!(config.page_filename, "index.html");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.ron");
        assert!(load(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(layout: Sideways)").unwrap();
        let err = load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }
}
