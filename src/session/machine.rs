//! Pure sign-in state machine.
//!
//! [`SessionMachine::apply`] takes one [`Input`] and returns the [`Effect`]s
//! the controller must carry out. No I/O happens here; the actor in
//! [`super::controller`] owns the machine and executes the effects.
//!
//! ```text
//!  LoggedOut ──auth ok──► LoggingIn ──profile ok──► LoggedIn
//!      ▲  │                   │                        │
//!      │  └─silent token──────┼──profile ok────────────┤
//!      │                      │                        │
//!      └──────profile err─────┘                        │
//!      └──────────────────sign-out ok──────────────────┘
//! ```

use uuid::Uuid;

use crate::auth::{AccessToken, AuthorizeError, SdkError, UserProfile};

use super::failure::{AuthFlowError, Notice};
use super::state::{Profile, UiState};

/// Identifies one profile fetch so late results can be told apart.
pub type RequestId = Uuid;

/// Commands from the host and results from the SDK.
#[derive(Debug, Clone)]
pub enum Input {
    StartInteractiveLogin,
    ResumeSessionIfPresent,
    SignOut,
    HostResumed,
    AuthorizationCompleted(Result<(), AuthorizeError>),
    SilentTokenResolved(Result<Option<AccessToken>, SdkError>),
    ProfileFetched {
        request: RequestId,
        result: Result<UserProfile, SdkError>,
    },
    SignOutCompleted(Result<(), SdkError>),
}

/// SDK operation the controller should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkCall {
    Authorize,
    SilentToken,
    FetchProfile(RequestId),
    SignOut,
    HostResumed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Launch(SdkCall),
    Render(UiState),
    Notify(Notice),
}

#[derive(Debug, Clone)]
pub struct SessionMachine {
    state: UiState,
    postal_code_placeholder: String,
    authorize_pending: bool,
    silent_pending: bool,
    sign_out_pending: bool,
    /// Latest profile fetch; results for any other id are stale.
    profile_request: Option<RequestId>,
}

impl SessionMachine {
    pub fn new(postal_code_placeholder: impl Into<String>) -> Self {
        Self {
            state: UiState::LoggedOut,
            postal_code_placeholder: postal_code_placeholder.into(),
            authorize_pending: false,
            silent_pending: false,
            sign_out_pending: false,
            profile_request: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn apply(&mut self, input: Input) -> Vec<Effect> {
        match input {
            Input::StartInteractiveLogin => self.start_interactive_login(),
            Input::ResumeSessionIfPresent => self.resume_session(),
            Input::SignOut => self.sign_out(),
            Input::HostResumed => vec![Effect::Launch(SdkCall::HostResumed)],
            Input::AuthorizationCompleted(result) => self.authorization_completed(result),
            Input::SilentTokenResolved(result) => self.silent_token_resolved(result),
            Input::ProfileFetched { request, result } => self.profile_fetched(request, result),
            Input::SignOutCompleted(result) => self.sign_out_completed(result),
        }
    }

    fn start_interactive_login(&mut self) -> Vec<Effect> {
        if self.state != UiState::LoggedOut {
            tracing::warn!(state = %self.state.kind(), "login requested outside logged-out state; ignoring");
            return Vec::new();
        }
        if self.authorize_pending {
            tracing::warn!("interactive authorization already in progress; ignoring");
            return Vec::new();
        }
        self.authorize_pending = true;
        vec![Effect::Launch(SdkCall::Authorize)]
    }

    fn resume_session(&mut self) -> Vec<Effect> {
        if self.silent_pending {
            tracing::debug!("silent token lookup already in flight");
            return Vec::new();
        }
        self.silent_pending = true;
        vec![Effect::Launch(SdkCall::SilentToken)]
    }

    fn sign_out(&mut self) -> Vec<Effect> {
        if !matches!(self.state, UiState::LoggedIn { .. }) {
            tracing::warn!(state = %self.state.kind(), "sign-out requested while not logged in; ignoring");
            return Vec::new();
        }
        if self.sign_out_pending {
            tracing::debug!("sign-out already in flight");
            return Vec::new();
        }
        self.sign_out_pending = true;
        vec![Effect::Launch(SdkCall::SignOut)]
    }

    fn authorization_completed(&mut self, result: Result<(), AuthorizeError>) -> Vec<Effect> {
        self.authorize_pending = false;
        let failure = match result {
            Ok(()) => {
                let transition = self.transition(UiState::LoggingIn);
                return vec![transition, self.begin_profile_fetch()];
            }
            Err(AuthorizeError::Failed(err)) => AuthFlowError::AuthorizationFailed(err),
            Err(AuthorizeError::Cancelled) => AuthFlowError::AuthorizationCancelled,
        };

        // Once authorization has succeeded only the profile result may leave LoggingIn.
        if self.state == UiState::LoggingIn {
            tracing::debug!(%failure, "authorization result ignored while logging in");
            return Vec::new();
        }

        match &failure {
            AuthFlowError::AuthorizationCancelled => tracing::info!("user cancelled authorization"),
            other => tracing::error!(error = %other, "authorization failed"),
        }
        // An outstanding resumed fetch stays current.
        self.fail_to_logged_out(&failure)
    }

    fn silent_token_resolved(&mut self, result: Result<Option<AccessToken>, SdkError>) -> Vec<Effect> {
        self.silent_pending = false;
        match result {
            Ok(Some(_)) => {
                if self.profile_request.is_some() {
                    tracing::debug!("existing session found; profile fetch already outstanding");
                    return Vec::new();
                }
                if self.state != UiState::LoggedOut {
                    tracing::debug!(state = %self.state.kind(), "existing session found; already signed in");
                    return Vec::new();
                }
                tracing::info!("resuming existing session");
                vec![self.begin_profile_fetch()]
            }
            Ok(None) => {
                tracing::debug!(reason = %AuthFlowError::SilentResumeAbsent, "user not signed in");
                Vec::new()
            }
            Err(err) => {
                tracing::debug!(error = %err, "user not signed in");
                Vec::new()
            }
        }
    }

    fn profile_fetched(&mut self, request: RequestId, result: Result<UserProfile, SdkError>) -> Vec<Effect> {
        if self.profile_request != Some(request) {
            tracing::debug!(request = %request, "discarding stale profile result");
            return Vec::new();
        }
        self.profile_request = None;

        match result {
            Ok(user) => {
                let profile = Profile::from_user(user, &self.postal_code_placeholder);
                tracing::debug!(account = %profile.account_id, "profile received");
                vec![self.transition(UiState::logged_in(profile))]
            }
            Err(err) => {
                let failure = AuthFlowError::ProfileFetchFailed(err);
                tracing::error!(error = %failure, "error retrieving profile");
                self.fail_to_logged_out(&failure)
            }
        }
    }

    fn sign_out_completed(&mut self, result: Result<(), SdkError>) -> Vec<Effect> {
        self.sign_out_pending = false;
        match result {
            Ok(()) => {
                self.profile_request = None;
                vec![self.transition(UiState::LoggedOut)]
            }
            Err(err) => {
                tracing::warn!(error = %AuthFlowError::SignOutFailed(err), "error clearing authorization state");
                Vec::new()
            }
        }
    }

    fn begin_profile_fetch(&mut self) -> Effect {
        let request = Uuid::new_v4();
        self.profile_request = Some(request);
        Effect::Launch(SdkCall::FetchProfile(request))
    }

    fn fail_to_logged_out(&mut self, failure: &AuthFlowError) -> Vec<Effect> {
        let mut effects = vec![self.transition(UiState::LoggedOut)];
        if let Some(notice) = failure.notice() {
            effects.push(Effect::Notify(notice));
        }
        effects
    }

    fn transition(&mut self, next: UiState) -> Effect {
        if self.state.kind() != next.kind() {
            tracing::info!(from = %self.state.kind(), to = %next.kind(), "session state changed");
        }
        self.state = next.clone();
        Effect::Render(next)
    }
}
