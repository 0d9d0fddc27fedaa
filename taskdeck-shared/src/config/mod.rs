//! Client configuration for native front ends.
//!
//! Values resolve in layers: built-in defaults, then an optional file, then
//! `TASKDECK_*` environment variables, then explicit overrides.

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::{api::DEFAULT_BASE_URL, auth::DEFAULT_SESSION_TTL_HOURS, models::DEFAULT_PAGE_SIZE};

pub const ENV_API_URL: &str = "TASKDECK_API_URL";
pub const ENV_PAGE_SIZE: &str = "TASKDECK_PAGE_SIZE";
pub const ENV_SESSION_TTL_HOURS: &str = "TASKDECK_SESSION_TTL_HOURS";
pub const ENV_SESSION_PATH: &str = "TASKDECK_SESSION_PATH";
pub const ENV_LOG_LEVEL: &str = "TASKDECK_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "TASKDECK_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported configuration format for {}; use yaml, json or toml", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("invalid {format} configuration: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },
    #[error("failed to render {format} configuration: {message}")]
    Render {
        format: ConfigFormat,
        message: String,
    },
    #[error("invalid {var} value {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Values supplied on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base_url: Option<Url>,
    pub session_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:5000/api`.
    pub api_base_url: Url,
    pub page_size: u32,
    pub session_ttl_hours: i64,
    /// Session file; the per-user config directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_path: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: default_api_url(),
            page_size: DEFAULT_PAGE_SIZE,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            session_path: None,
            logging: LoggingConfig::default(),
        }
    }

    /// Resolve the configuration from every layer and validate the result.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed, an
    /// environment variable is malformed, or validation fails.
    pub fn load_config(
        config_path: Option<&Path>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        config.apply_env()?;

        if let Some(url) = &overrides.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(path) = &overrides.session_path {
            config.session_path = Some(path.clone());
        }

        config.validate().map_err(ConfigError::Invalid)?;
        debug!(api = %config.api_base_url, page_size = config.page_size, "configuration resolved");
        Ok(config)
    }

    /// Parse a configuration file. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for unreadable files, unknown extensions and
    /// malformed content.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format)
    }

    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed content.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parsed: Result<Self, String> = match format {
            ConfigFormat::Yaml => serde_yml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse { format, message })
    }

    /// # Errors
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let rendered = match format {
            ConfigFormat::Yaml => serde_yml::to_string(self).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| ConfigError::Render { format, message })
    }

    /// Overlay `TASKDECK_*` environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] for values that do not parse.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = env_value(ENV_API_URL) {
            self.api_base_url = Url::parse(&value).map_err(|_| ConfigError::InvalidEnv {
                var: ENV_API_URL,
                value,
            })?;
        }
        if let Some(value) = env_value(ENV_PAGE_SIZE) {
            self.page_size = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_PAGE_SIZE,
                value,
            })?;
        }
        if let Some(value) = env_value(ENV_SESSION_TTL_HOURS) {
            self.session_ttl_hours = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_SESSION_TTL_HOURS,
                value,
            })?;
        }
        if let Some(value) = env_value(ENV_SESSION_PATH) {
            self.session_path = Some(PathBuf::from(value));
        }
        if let Some(value) = env_value(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
        if let Some(value) = env_value(ENV_LOG_FORMAT) {
            self.logging.format = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LOG_FORMAT,
                value,
            })?;
        }
        Ok(())
    }

    /// Collect every problem instead of stopping at the first.
    ///
    /// # Errors
    /// Returns the list of messages when anything is out of range.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !matches!(self.api_base_url.scheme(), "http" | "https") {
            errors.push(format!(
                "API base URL must use http or https: {}",
                self.api_base_url
            ));
        }
        if self.page_size == 0 {
            errors.push("Page size must be greater than 0.".to_string());
        }
        if self.session_ttl_hours <= 0 {
            errors.push("Session lifetime must be at least one hour.".to_string());
        }
        if self.logging.level.trim().is_empty() {
            errors.push("Log level must not be empty.".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }

    /// Where the session is persisted.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.session_path
            .clone()
            .or_else(default_session_path)
            .unwrap_or_else(|| PathBuf::from(".taskdeck-session.json"))
    }
}

/// `<config dir>/taskdeck/session.json` for the current user.
#[must_use]
pub fn default_session_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join("taskdeck").join("session.json"))
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default API URL is valid"))
}

fn env_value(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}
