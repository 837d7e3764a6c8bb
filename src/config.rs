//! Configuration loading and management for ytsumma.
//!
//! Loads settings from `ytsumma.toml` with an environment variable override
//! for the backend endpoint. A missing file falls back to defaults so the
//! client works out of the box against a local backend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Backend origin used when no config file or override is present.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001";

/// Timeout applied to the one-shot (non-streaming) request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Summarization backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin of the summarization service (scheme + host + port)
    pub endpoint: String,
    /// Timeout in seconds for the one-shot request path
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from the default location (ytsumma.toml in cwd or home).
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::find_config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };
        Ok(config.with_endpoint_override(std::env::var("YTSUMMA_ENDPOINT").ok()))
    }

    /// Apply the environment endpoint override, if one is set and non-empty.
    fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            if !endpoint.is_empty() {
                self.backend.endpoint = endpoint;
            }
        }
        self
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("ytsumma.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("ytsumma").join("ytsumma.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Full URL of the `/process_video` endpoint
    pub fn process_video_url(&self) -> String {
        format!("{}/process_video", self.backend.endpoint.trim_end_matches('/'))
    }
}
