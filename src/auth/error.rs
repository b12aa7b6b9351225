use thiserror::Error;

/// Normalized failures reported by an authorization SDK.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Access denied")]
    AccessDenied,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Service error: {0}")]
    Service(String),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
