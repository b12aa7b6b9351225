//! Error types for signin.

use thiserror::Error;

/// Primary error type for controller and configuration operations.
///
/// Sign-in flow failures are not represented here: those are recovered
/// inside the controller (see [`crate::session::AuthFlowError`]).
#[derive(Error, Debug)]
pub enum SigninError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Session controller is no longer running")]
    ControllerClosed,

    #[error("Session controller task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SigninError {
    /// Whether the error came from user-supplied settings rather than the runtime.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Toml(_) | Self::InvalidArgument(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SigninError>;
