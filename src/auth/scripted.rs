//! In-process SDK that answers from a script instead of a provider.
//!
//! Used by the CLI host to play scenarios and by tests that want realistic
//! timing without a network. Tokens are kept in memory only.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::error::SdkError;
use super::scope::Scope;
use super::sdk::{AuthorizationSdk, AuthorizeError, UserProfile};
use super::token::AccessToken;

/// How a scripted interactive authorization ends.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuthorizeOutcome {
    #[default]
    Success,
    Error,
    Cancelled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthorizeScript {
    pub outcome: AuthorizeOutcome,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SilentTokenScript {
    /// A session already exists when the SDK starts.
    pub present: bool,
    pub fail: bool,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileScript {
    pub name: String,
    pub email: String,
    pub account_id: String,
    pub postal_code: Option<String>,
    pub fail: bool,
    pub delay_ms: u64,
}

impl Default for ProfileScript {
    fn default() -> Self {
        Self {
            name: "Test User".to_string(),
            email: "user@example.com".to_string(),
            account_id: "account-0001".to_string(),
            postal_code: None,
            fail: false,
            delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SignOutScript {
    pub fail: bool,
    pub delay_ms: u64,
}

/// Canned answers for every SDK operation.
///
/// # Example
/// ```
/// use signin::auth::SdkScript;
///
/// let script: SdkScript = toml::from_str(r#"
///     [authorize]
///     outcome = "cancelled"
///
///     [profile]
///     name = "Ana"
///     email = "a@x.com"
///     account_id = "123"
/// "#).unwrap();
/// assert!(script.profile.postal_code.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SdkScript {
    pub authorize: AuthorizeScript,
    pub silent_token: SilentTokenScript,
    pub profile: ProfileScript,
    pub sign_out: SignOutScript,
}

/// [`AuthorizationSdk`] driven by an [`SdkScript`].
#[derive(Debug)]
pub struct ScriptedSdk {
    script: SdkScript,
    session: Mutex<Option<AccessToken>>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedSdk {
    pub fn new(script: SdkScript) -> Self {
        let session = script
            .silent_token
            .present
            .then(|| AccessToken::new("scripted-existing-session"));
        Self {
            script,
            session: Mutex::new(session),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Names of the operations invoked so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn has_session(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    fn record(&self, call: &'static str) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    fn set_session(&self, token: Option<AccessToken>) {
        *self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}

async fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[async_trait]
impl AuthorizationSdk for ScriptedSdk {
    async fn authorize(&self, scopes: &[Scope]) -> Result<(), AuthorizeError> {
        self.record("authorize");
        pause(self.script.authorize.delay_ms).await;
        match self.script.authorize.outcome {
            AuthorizeOutcome::Success => {
                tracing::debug!(scopes = ?scopes, "scripted authorization granted");
                self.set_session(Some(AccessToken::new("scripted-interactive-session")));
                Ok(())
            }
            AuthorizeOutcome::Error => Err(AuthorizeError::Failed(SdkError::AccessDenied)),
            AuthorizeOutcome::Cancelled => Err(AuthorizeError::Cancelled),
        }
    }

    async fn get_token_silently(&self, _scopes: &[Scope]) -> Result<Option<AccessToken>, SdkError> {
        self.record("get_token_silently");
        pause(self.script.silent_token.delay_ms).await;
        if self.script.silent_token.fail {
            return Err(SdkError::Service("token lookup failed".to_string()));
        }
        Ok(self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    async fn fetch_profile(&self) -> Result<UserProfile, SdkError> {
        self.record("fetch_profile");
        let profile = &self.script.profile;
        pause(profile.delay_ms).await;
        if profile.fail {
            return Err(SdkError::Service("profile endpoint unavailable".to_string()));
        }
        if !self.has_session() {
            return Err(SdkError::NotLoggedIn);
        }
        Ok(UserProfile {
            name: profile.name.clone(),
            email: profile.email.clone(),
            account_id: profile.account_id.clone(),
            postal_code: profile.postal_code.clone(),
        })
    }

    async fn sign_out(&self) -> Result<(), SdkError> {
        self.record("sign_out");
        pause(self.script.sign_out.delay_ms).await;
        if self.script.sign_out.fail {
            return Err(SdkError::Network("sign-out request failed".to_string()));
        }
        self.set_session(None);
        Ok(())
    }

    fn on_host_resumed(&self) {
        self.record("on_host_resumed");
    }
}
