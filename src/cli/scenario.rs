//! Scenario files played by `signin run`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::SdkScript;
use crate::error::{Result, SigninError};

/// Quiet period after which the screen is considered settled.
const SETTLE_MARGIN_MS: u64 = 100;

/// One host-side step in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    Resume,
    Login,
    SignOut,
    HostResumed,
    Wait(u64),
}

impl FromStr for Action {
    type Err = SigninError;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Some(ms) = value.strip_prefix("wait:") {
            return ms.trim().parse().map(Action::Wait).map_err(|_| {
                SigninError::InvalidArgument(format!("wait needs milliseconds, got {value:?}"))
            });
        }
        match value {
            "resume" => Ok(Action::Resume),
            "login" => Ok(Action::Login),
            "sign_out" | "sign-out" | "logout" => Ok(Action::SignOut),
            "host_resumed" => Ok(Action::HostResumed),
            other => Err(SigninError::InvalidArgument(format!(
                "unknown action: {other} (supported: resume, login, sign_out, host_resumed, wait:<ms>)"
            ))),
        }
    }
}

impl TryFrom<String> for Action {
    type Error = SigninError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Resume => f.write_str("resume"),
            Action::Login => f.write_str("login"),
            Action::SignOut => f.write_str("sign_out"),
            Action::HostResumed => f.write_str("host_resumed"),
            Action::Wait(ms) => write!(f, "wait:{ms}"),
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

/// Host actions plus the SDK script that answers them.
///
/// ```toml
/// actions = ["resume", "login", "sign_out"]
///
/// [sdk.profile]
/// name = "Ana"
/// email = "a@x.com"
/// account_id = "123"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub actions: Vec<Action>,
    pub sdk: SdkScript,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// How long the screen must stay quiet before the next action runs.
    ///
    /// A silent resume chains two SDK calls without rendering in between, so
    /// the window covers every scripted delay back to back.
    pub fn settle_window(&self) -> Duration {
        let sdk = &self.sdk;
        let total: u64 = [
            sdk.authorize.delay_ms,
            sdk.silent_token.delay_ms,
            sdk.profile.delay_ms,
            sdk.sign_out.delay_ms,
        ]
        .into_iter()
        .sum();
        Duration::from_millis(total + SETTLE_MARGIN_MS)
    }
}
