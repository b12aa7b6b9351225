//! Contract consumed from the third-party authorization SDK.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::SdkError;
use super::scope::Scope;
use super::token::AccessToken;

/// Why an interactive authorization did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizeError {
    #[error("authorization failed: {0}")]
    Failed(SdkError),
    #[error("authorization cancelled")]
    Cancelled,
}

/// Profile attributes as the provider returns them.
///
/// `postal_code` is `None` when the provider has nothing on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub account_id: String,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Authorization SDK operations used by the session controller.
///
/// Each call resolves exactly once. Implementations own token exchange,
/// browser redirects and token storage; the controller never sees any of it.
#[async_trait]
pub trait AuthorizationSdk: Send + Sync {
    /// Run the interactive consent flow for `scopes`.
    async fn authorize(&self, scopes: &[Scope]) -> Result<(), AuthorizeError>;

    /// Look up an already-issued token without user interaction.
    ///
    /// `Ok(None)` means there is no session.
    async fn get_token_silently(&self, scopes: &[Scope]) -> Result<Option<AccessToken>, SdkError>;

    /// Fetch the signed-in user's profile.
    async fn fetch_profile(&self) -> Result<UserProfile, SdkError>;

    /// Clear the stored authorization.
    async fn sign_out(&self) -> Result<(), SdkError>;

    /// Host screen came back to the foreground.
    ///
    /// SDKs that finish interactive flows in an external browser use this to
    /// deliver the pending result.
    fn on_host_resumed(&self) {}
}
