use serde::Serialize;

use super::failure::Notice;
use super::state::{Profile, UiState};

/// Capability the host screen hands to the controller.
///
/// Every call is made from the controller task, one at a time, so
/// implementations can update their widgets without further locking.
pub trait Presenter: Send {
    /// Show the login affordance and the default prompt.
    fn show_logged_out(&mut self, prompt: &str);
    /// Hide both affordances and show progress.
    fn show_logging_in(&mut self);
    /// Show the profile summary and the sign-out affordance.
    fn show_logged_in(&mut self, profile: &Profile);
    /// Surface a transient message.
    fn show_notice(&mut self, notice: &Notice);
}

/// Presenter that drops everything, for headless controllers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_logged_out(&mut self, _prompt: &str) {}
    fn show_logging_in(&mut self) {}
    fn show_logged_in(&mut self, _profile: &Profile) {}
    fn show_notice(&mut self, _notice: &Notice) {}
}

/// Visibility of every element on the sign-in screen for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub login_enabled: bool,
    pub sign_out_enabled: bool,
    pub progress_visible: bool,
    /// `None` while the text region is hidden.
    pub text: Option<String>,
}

impl ScreenView {
    pub fn for_state(state: &UiState, prompt: &str) -> Self {
        match state {
            UiState::LoggedOut => Self {
                login_enabled: true,
                sign_out_enabled: false,
                progress_visible: false,
                text: Some(prompt.to_string()),
            },
            UiState::LoggingIn => Self {
                login_enabled: false,
                sign_out_enabled: false,
                progress_visible: true,
                text: None,
            },
            UiState::LoggedIn { profile } => Self {
                login_enabled: false,
                sign_out_enabled: true,
                progress_visible: false,
                text: Some(profile.summary()),
            },
        }
    }
}

/// Route a state to the matching [`Presenter`] call.
pub fn present(presenter: &mut dyn Presenter, state: &UiState, prompt: &str) {
    match state {
        UiState::LoggedOut => presenter.show_logged_out(prompt),
        UiState::LoggingIn => presenter.show_logging_in(),
        UiState::LoggedIn { profile } => presenter.show_logged_in(profile),
    }
}
