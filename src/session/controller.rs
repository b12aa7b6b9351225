//! Session controller actor.
//!
//! All state lives in a single task that owns the [`SessionMachine`] and the
//! [`Presenter`]. SDK calls run on their own tasks and post their results
//! back through the same inbox as host commands, so state is only ever
//! touched from one place.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::auth::{AuthorizationSdk, LOGIN_SCOPES};
use crate::config::SigninConfig;
use crate::error::{Result, SigninError};

use super::events::{EventSequencer, ScreenEvent, ScreenEventPayload};
use super::machine::{Effect, Input, SdkCall, SessionMachine};
use super::state::UiState;
use super::view::{present, Presenter};

enum Message {
    Input(Input),
    Shutdown,
}

/// Handle to a running sign-in session controller.
///
/// Commands are fire-and-forget: they return once queued, and their effect
/// shows up on [`watch_state`](Self::watch_state) and
/// [`subscribe`](Self::subscribe).
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use signin::auth::{ScriptedSdk, SdkScript};
/// use signin::config::SigninConfig;
/// use signin::session::{AuthSessionController, NullPresenter};
///
/// # async fn example() -> signin::error::Result<()> {
/// let sdk = Arc::new(ScriptedSdk::new(SdkScript::default()));
/// let controller =
///     AuthSessionController::spawn(sdk, Box::new(NullPresenter), &SigninConfig::default());
/// controller.resume_session_if_present()?;
/// controller.start_interactive_login()?;
/// controller.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct AuthSessionController {
    commands: mpsc::UnboundedSender<Message>,
    state_rx: watch::Receiver<UiState>,
    events_tx: broadcast::Sender<ScreenEvent>,
    task: JoinHandle<()>,
}

impl AuthSessionController {
    /// Start the controller task. Must be called inside a Tokio runtime.
    pub fn spawn(
        sdk: Arc<dyn AuthorizationSdk>,
        presenter: Box<dyn Presenter>,
        config: &SigninConfig,
    ) -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(UiState::LoggedOut);
        let (events_tx, _) = broadcast::channel(config.event_buffer.max(1));

        let actor = SessionActor {
            machine: SessionMachine::new(config.postal_code_placeholder.clone()),
            sdk,
            presenter,
            prompt: config.default_prompt.clone(),
            outbox: commands.downgrade(),
            state_tx,
            events_tx: events_tx.clone(),
            sequencer: EventSequencer::default(),
        };
        let task = tokio::spawn(actor.run(inbox));

        Self {
            commands,
            state_rx,
            events_tx,
            task,
        }
    }

    /// Launch the interactive authorization flow.
    pub fn start_interactive_login(&self) -> Result<()> {
        self.send(Input::StartInteractiveLogin)
    }

    /// Pick up an existing session, if the SDK still holds one.
    pub fn resume_session_if_present(&self) -> Result<()> {
        self.send(Input::ResumeSessionIfPresent)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.send(Input::SignOut)
    }

    /// Forward the host screen's "resumed" lifecycle signal to the SDK.
    pub fn host_resumed(&self) -> Result<()> {
        self.send(Input::HostResumed)
    }

    /// Current state.
    pub fn state(&self) -> UiState {
        self.state_rx.borrow().clone()
    }

    pub fn watch_state(&self) -> watch::Receiver<UiState> {
        self.state_rx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScreenEvent> {
        self.events_tx.subscribe()
    }

    /// Screen events as a stream; gaps from a lagging subscriber are skipped.
    pub fn events(&self) -> impl Stream<Item = ScreenEvent> + Send + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|item| item.ok())
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop after the commands already queued, then wait for the task.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.commands.send(Message::Shutdown);
        self.task.await?;
        Ok(())
    }

    fn send(&self, input: Input) -> Result<()> {
        self.commands
            .send(Message::Input(input))
            .map_err(|_| SigninError::ControllerClosed)
    }
}

struct SessionActor {
    machine: SessionMachine,
    sdk: Arc<dyn AuthorizationSdk>,
    presenter: Box<dyn Presenter>,
    prompt: String,
    outbox: mpsc::WeakUnboundedSender<Message>,
    state_tx: watch::Sender<UiState>,
    events_tx: broadcast::Sender<ScreenEvent>,
    sequencer: EventSequencer,
}

impl SessionActor {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Message>) {
        present(self.presenter.as_mut(), self.machine.state(), &self.prompt);

        while let Some(message) = inbox.recv().await {
            match message {
                Message::Input(input) => {
                    for effect in self.machine.apply(input) {
                        self.execute(effect);
                    }
                }
                Message::Shutdown => break,
            }
        }
        tracing::debug!(state = %self.machine.state().kind(), "session controller stopped");
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::Launch(call) => self.launch(call),
            Effect::Render(state) => {
                present(self.presenter.as_mut(), &state, &self.prompt);
                self.state_tx.send_replace(state.clone());
                self.publish(ScreenEventPayload::StateChanged { state });
            }
            Effect::Notify(notice) => {
                self.presenter.show_notice(&notice);
                self.publish(ScreenEventPayload::Notice { notice });
            }
        }
    }

    fn publish(&mut self, payload: ScreenEventPayload) {
        let event = self.sequencer.wrap(payload);
        // No subscribers is fine.
        let _ = self.events_tx.send(event);
    }

    fn launch(&self, call: SdkCall) {
        if call == SdkCall::HostResumed {
            self.sdk.on_host_resumed();
            return;
        }
        let Some(outbox) = self.outbox.upgrade() else {
            tracing::debug!(?call, "controller closing; not starting SDK call");
            return;
        };
        let sdk = Arc::clone(&self.sdk);

        tokio::spawn(async move {
            let input = match call {
                SdkCall::Authorize => Input::AuthorizationCompleted(sdk.authorize(&LOGIN_SCOPES).await),
                SdkCall::SilentToken => {
                    Input::SilentTokenResolved(sdk.get_token_silently(&LOGIN_SCOPES).await)
                }
                SdkCall::FetchProfile(request) => Input::ProfileFetched {
                    request,
                    result: sdk.fetch_profile().await,
                },
                SdkCall::SignOut => Input::SignOutCompleted(sdk.sign_out().await),
                SdkCall::HostResumed => return,
            };
            if outbox.send(Message::Input(input)).is_err() {
                tracing::debug!(?call, "controller stopped before SDK result arrived");
            }
        });
    }
}
