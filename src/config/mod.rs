//! Configuration system (layered: defaults > config file > env).

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SigninError};
use crate::session::state::DEFAULT_POSTAL_CODE_PLACEHOLDER;

pub const DEFAULT_PROMPT: &str = "Sign in to see your profile.";
pub const DEFAULT_EVENT_BUFFER: usize = 64;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variables read by [`SigninConfig::apply_env`].
pub const ENV_POSTAL_CODE_PLACEHOLDER: &str = "SIGNIN_POSTAL_CODE_PLACEHOLDER";
pub const ENV_DEFAULT_PROMPT: &str = "SIGNIN_DEFAULT_PROMPT";
pub const ENV_EVENT_BUFFER: &str = "SIGNIN_EVENT_BUFFER";
pub const ENV_LOG: &str = "SIGNIN_LOG";

/// Settings for the sign-in screen.
///
/// Resolution order, later layers winning:
/// 1. Built-in defaults
/// 2. TOML file (`~/.signin/config.toml` unless a path is given)
/// 3. `SIGNIN_*` environment variables (a `.env` file is honoured)
///
/// # Example
/// ```
/// use signin::config::SigninConfig;
///
/// let config = SigninConfig::builder()
///     .postal_code_placeholder("00000")
///     .build();
/// assert_eq!(config.event_buffer, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct SigninConfig {
    /// Shown when the provider has no postal code on file.
    #[builder(into, default = DEFAULT_POSTAL_CODE_PLACEHOLDER.to_string())]
    pub postal_code_placeholder: String,
    /// Text in the profile region while logged out.
    #[builder(into, default = DEFAULT_PROMPT.to_string())]
    pub default_prompt: String,
    /// Capacity of the screen event broadcast channel.
    #[builder(default = DEFAULT_EVENT_BUFFER)]
    pub event_buffer: usize,
    /// `tracing-subscriber` filter used by the CLI when `RUST_LOG` is unset.
    #[builder(into, default = DEFAULT_LOG_FILTER.to_string())]
    pub log_filter: String,
}

impl Default for SigninConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SigninConfig {
    /// Default config file path (~/.signin/config.toml).
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".signin"))
            .unwrap_or_else(|| PathBuf::from(".signin"))
            .join("config.toml")
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(SigninError::Io(err)),
        };
        Ok(toml::from_str(&raw)?)
    }

    /// Full layered load: file (explicit or default path), then environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load_from_path(Self::default_path())?,
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment, ignoring any config file.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `SIGNIN_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable source.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup(ENV_POSTAL_CODE_PLACEHOLDER) {
            self.postal_code_placeholder = value;
        }
        if let Some(value) = lookup(ENV_DEFAULT_PROMPT) {
            self.default_prompt = value;
        }
        if let Some(value) = lookup(ENV_EVENT_BUFFER) {
            self.event_buffer = value.trim().parse().map_err(|_| {
                SigninError::Configuration(format!(
                    "{ENV_EVENT_BUFFER} must be a positive integer, got {value:?}"
                ))
            })?;
        }
        if let Some(value) = lookup(ENV_LOG) {
            self.log_filter = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_buffer == 0 {
            return Err(SigninError::Configuration(
                "event_buffer must be greater than zero".to_string(),
            ));
        }
        if self.postal_code_placeholder.trim().is_empty() {
            return Err(SigninError::Configuration(
                "postal_code_placeholder must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
