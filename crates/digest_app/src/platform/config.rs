//! Application configuration: defaults, then an optional RON file, then
//! `DIGEST_*` environment variables.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use digest_core::default_topics;
use digest_engine::FetchSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "digest.ron";
pub const CONFIG_PATH_ENV: &str = "DIGEST_CONFIG";

const DEFAULT_WEBHOOK_URL: &str =
    "https://caic-n8n-stage.k8s.stage.ix.statsperform.cloud/webhook/ai.digest";
const DEFAULT_TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/asher2609/ai-digest/main/SP.template.png";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{field} is not a valid url ({value}): {message}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        message: String,
    },
    #[error("bind_addr is not a socket address ({value}): {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("{key} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("invalid {key}: {message}")]
    InvalidLogDestination { key: &'static str, message: String },
    #[error("topic list must not contain empty entries")]
    EmptyTopic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub webhook_url: String,
    pub template_url: String,
    pub bind_addr: String,
    pub timeout_secs: u64,
    pub session_idle_secs: u64,
    pub title: String,
    pub topics: Vec<String>,
    pub log_destination: LogDestination,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            bind_addr: "127.0.0.1:8501".to_string(),
            timeout_secs: 10,
            session_idle_secs: 3600,
            title: "AI Sports Digest".to_string(),
            topics: default_topics(),
            log_destination: LogDestination::default(),
        }
    }
}

impl DigestConfig {
    /// Loads from the process environment and working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Applies `DIGEST_*` overrides; `lookup` abstracts the environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DIGEST_WEBHOOK_URL") {
            self.webhook_url = value;
        }
        if let Some(value) = lookup("DIGEST_TEMPLATE_URL") {
            self.template_url = value;
        }
        if let Some(value) = lookup("DIGEST_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("DIGEST_TITLE") {
            self.title = value;
        }
        if let Some(value) = lookup("DIGEST_TIMEOUT_SECS") {
            self.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                key: "DIGEST_TIMEOUT_SECS",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("DIGEST_SESSION_IDLE_SECS") {
            self.session_idle_secs =
                value.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                    key: "DIGEST_SESSION_IDLE_SECS",
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup("DIGEST_LOG") {
            self.log_destination =
                value
                    .parse()
                    .map_err(|message| ConfigError::InvalidLogDestination {
                        key: "DIGEST_LOG",
                        message,
                    })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("webhook_url", &self.webhook_url)?;
        check_url("template_url", &self.template_url)?;
        self.socket_addr()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                key: "timeout_secs",
                value: "0".to_string(),
            });
        }
        if self.session_idle_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                key: "session_idle_secs",
                value: "0".to_string(),
            });
        }
        if self.topics.iter().any(|topic| topic.trim().is_empty()) {
            return Err(ConfigError::EmptyTopic);
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                message: err.to_string(),
            })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings::with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|err| ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            message: err.to_string(),
        })
}
