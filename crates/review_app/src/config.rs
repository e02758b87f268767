//! `lmreview.ron` loading.
//!
//! Every field is optional in the file; missing ones take the defaults below.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use review_core::{PathResolver, Timings};
use review_logging::review_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "lmreview.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("config lists no {0}")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    pub refresh_debounce_ms: u64,
    pub new_file_settle_ms: u64,
    pub new_file_refresh_ms: u64,
    pub clipboard_poll_ms: u64,
    pub clipboard_first_poll_ms: u64,
    pub notification_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            refresh_debounce_ms: 300,
            new_file_settle_ms: 800,
            new_file_refresh_ms: 200,
            clipboard_poll_ms: 700,
            clipboard_first_poll_ms: 10,
            notification_ms: 3000,
        }
    }
}

impl TimingsConfig {
    pub fn to_timings(&self) -> Timings {
        Timings {
            refresh_debounce: Duration::from_millis(self.refresh_debounce_ms),
            new_file_settle: Duration::from_millis(self.new_file_settle_ms),
            new_file_refresh: Duration::from_millis(self.new_file_refresh_ms),
            clipboard_poll: Duration::from_millis(self.clipboard_poll_ms),
            clipboard_first_poll: Duration::from_millis(self.clipboard_first_poll_ms),
            notification: Duration::from_millis(self.notification_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the project tree; the executable's directory when unset.
    pub base_path: Option<PathBuf>,
    pub projects: Vec<String>,
    pub deliveries: Vec<String>,
    pub input_folder: String,
    pub output_folder: String,
    pub notebook_url: String,
    pub timings: TimingsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            projects: vec![
                "【雲端案】".to_string(),
                "【整合案】".to_string(),
                "【Trod案】".to_string(),
            ],
            deliveries: vec!["【契約交付】".to_string(), "【其他交付】".to_string()],
            input_folder: "input".to_string(),
            output_folder: "output".to_string(),
            notebook_url: "https://notebooklm.google.com/".to_string(),
            timings: TimingsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `lmreview.ron` next to the executable when `None`.
    ///
    /// A missing file yields defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (executable_dir().join(CONFIG_FILENAME), false),
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let config = Self::parse(&text).map_err(|err| match err {
            ParseFailure::Ron(source) => ConfigError::Parse {
                path: path.clone(),
                source,
            },
            ParseFailure::Empty(what) => ConfigError::Empty(what),
        })?;
        review_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, ParseFailure> {
        let config: AppConfig = ron::from_str(text).map_err(ParseFailure::Ron)?;
        if config.projects.is_empty() {
            return Err(ParseFailure::Empty("projects"));
        }
        if config.deliveries.is_empty() {
            return Err(ParseFailure::Empty("deliveries"));
        }
        Ok(config)
    }

    pub fn base_path(&self) -> PathBuf {
        self.base_path.clone().unwrap_or_else(executable_dir)
    }

    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(
            self.base_path(),
            self.input_folder.as_str(),
            self.output_folder.as_str(),
        )
    }

    pub fn default_project(&self) -> &str {
        self.projects.first().map(String::as_str).unwrap_or_default()
    }

    pub fn default_delivery(&self) -> &str {
        self.deliveries.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug)]
enum ParseFailure {
    Ron(ron::error::SpannedError),
    Empty(&'static str),
}

fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
