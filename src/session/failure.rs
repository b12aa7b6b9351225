use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::auth::SdkError;

pub const AUTHORIZATION_FAILED_NOTICE: &str = "Error during authorization. Please try again.";
pub const AUTHORIZATION_CANCELLED_NOTICE: &str = "Authorization cancelled";
pub const PROFILE_FETCH_FAILED_NOTICE: &str =
    "Error retrieving profile information. Please log in again.";

/// Everything that can go wrong in a sign-in flow.
///
/// All of these are recovered inside the controller; they surface only as
/// a [`Notice`] (or a log line).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFlowError {
    #[error("authorization failed: {0}")]
    AuthorizationFailed(SdkError),
    #[error("authorization cancelled")]
    AuthorizationCancelled,
    #[error("profile fetch failed: {0}")]
    ProfileFetchFailed(SdkError),
    #[error("sign-out failed: {0}")]
    SignOutFailed(SdkError),
    #[error("no existing session")]
    SilentResumeAbsent,
}

impl AuthFlowError {
    pub fn kind(&self) -> NoticeKind {
        match self {
            Self::AuthorizationFailed(_) => NoticeKind::AuthorizationFailed,
            Self::AuthorizationCancelled => NoticeKind::AuthorizationCancelled,
            Self::ProfileFetchFailed(_) => NoticeKind::ProfileFetchFailed,
            Self::SignOutFailed(_) => NoticeKind::SignOutFailed,
            Self::SilentResumeAbsent => NoticeKind::SilentResumeAbsent,
        }
    }

    /// User-facing text, or `None` for failures that stay silent.
    pub fn notice_text(&self) -> Option<&'static str> {
        match self {
            Self::AuthorizationFailed(_) => Some(AUTHORIZATION_FAILED_NOTICE),
            Self::AuthorizationCancelled => Some(AUTHORIZATION_CANCELLED_NOTICE),
            Self::ProfileFetchFailed(_) => Some(PROFILE_FETCH_FAILED_NOTICE),
            Self::SignOutFailed(_) | Self::SilentResumeAbsent => None,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice_text().map(|text| Notice {
            kind: self.kind(),
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoticeKind {
    AuthorizationFailed,
    AuthorizationCancelled,
    ProfileFetchFailed,
    SignOutFailed,
    SilentResumeAbsent,
}

/// Transient message for the user (a toast on mobile hosts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}
