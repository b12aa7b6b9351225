//! Terminal rendering of the sign-in screen.

use std::io::Write;

use crate::session::{Notice, Presenter, Profile, ScreenView, UiState};

/// Render one screen view as text.
pub fn render_view(view: &ScreenView) -> String {
    let flag = |on: bool| if on { "on" } else { "off" };
    let mut out = format!(
        "[login: {}] [sign out: {}] [progress: {}]\n",
        flag(view.login_enabled),
        flag(view.sign_out_enabled),
        flag(view.progress_visible)
    );
    match &view.text {
        Some(text) => {
            for line in text.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        None => out.push_str("  (signing in...)\n"),
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    format!("! {}\n", notice.text)
}

/// [`Presenter`] that writes each screen to a terminal stream.
pub struct TerminalPresenter {
    out: Box<dyn Write + Send>,
}

impl TerminalPresenter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!(error = %err, "failed to write screen");
        }
    }

    fn draw(&mut self, state: &UiState, prompt: &str) {
        let text = render_view(&ScreenView::for_state(state, prompt));
        self.emit(&text);
    }
}

impl Presenter for TerminalPresenter {
    fn show_logged_out(&mut self, prompt: &str) {
        self.draw(&UiState::LoggedOut, prompt);
    }

    fn show_logging_in(&mut self) {
        self.draw(&UiState::LoggingIn, "");
    }

    fn show_logged_in(&mut self, profile: &Profile) {
        self.draw(&UiState::logged_in(profile.clone()), "");
    }

    fn show_notice(&mut self, notice: &Notice) {
        let text = render_notice(notice);
        self.emit(&text);
    }
}
