use serde::{Deserialize, Serialize};
use strum::Display;

use crate::auth::UserProfile;

/// Postal code shown when the provider has none on file.
pub const DEFAULT_POSTAL_CODE_PLACEHOLDER: &str = "11111";

/// Profile summary displayed while signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub email: String,
    pub account_id: String,
    pub postal_code: String,
}

impl Profile {
    /// Build the displayed profile, filling a missing postal code with
    /// `placeholder`. Present values are kept as-is.
    pub fn from_user(user: UserProfile, placeholder: &str) -> Self {
        let postal_code = match user.postal_code {
            Some(code) if !code.trim().is_empty() => code,
            _ => placeholder.to_string(),
        };
        Self {
            display_name: user.name,
            email: user.email,
            account_id: user.account_id,
            postal_code,
        }
    }

    /// Text shown in the profile region.
    pub fn summary(&self) -> String {
        format!(
            "Welcome, {}!\nYour email is {}\nYour postal code is {}",
            self.display_name, self.email, self.postal_code
        )
    }
}

/// What the sign-in screen is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UiState {
    #[default]
    LoggedOut,
    LoggingIn,
    LoggedIn { profile: Profile },
}

/// Fieldless mirror of [`UiState`] for logs and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StateKind {
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

impl UiState {
    pub fn logged_in(profile: Profile) -> Self {
        Self::LoggedIn { profile }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            Self::LoggedOut => StateKind::LoggedOut,
            Self::LoggingIn => StateKind::LoggingIn,
            Self::LoggedIn { .. } => StateKind::LoggedIn,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::LoggedIn { profile } => Some(profile),
            _ => None,
        }
    }
}
