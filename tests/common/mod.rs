//! Shared test helpers: a hand-driven SDK and a recording presenter.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use signin::auth::{AccessToken, AuthorizationSdk, AuthorizeError, Scope, SdkError, UserProfile};
use signin::session::{
    Notice, Presenter, Profile, ScreenEvent, ScreenEventPayload, StateKind, UiState,
};

pub const WAIT: Duration = Duration::from_secs(2);

/// An SDK call parked until the test answers it.
#[derive(Debug)]
pub enum PendingCall {
    Authorize(oneshot::Sender<Result<(), AuthorizeError>>),
    SilentToken(oneshot::Sender<Result<Option<AccessToken>, SdkError>>),
    FetchProfile(oneshot::Sender<Result<UserProfile, SdkError>>),
    SignOut(oneshot::Sender<Result<(), SdkError>>),
}

/// SDK whose every call blocks until the test resolves it, so callback
/// ordering is fully under test control.
pub struct ManualSdk {
    calls_tx: mpsc::UnboundedSender<PendingCall>,
    calls_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<PendingCall>>,
    host_resumes: AtomicUsize,
}

impl ManualSdk {
    pub fn new() -> Arc<Self> {
        let (calls_tx, calls_rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            calls_tx,
            calls_rx: tokio::sync::Mutex::new(calls_rx),
            host_resumes: AtomicUsize::new(0),
        })
    }

    pub async fn next_call(&self) -> PendingCall {
        let mut rx = self.calls_rx.lock().await;
        tokio::time::timeout(WAIT, rx.recv())
            .await
            .expect("SDK call within timeout")
            .expect("SDK call channel open")
    }

    /// Let queued work run, then assert nothing reached the SDK.
    pub async fn assert_no_call(&self) {
        settle().await;
        let mut rx = self.calls_rx.lock().await;
        if let Ok(call) = rx.try_recv() {
            panic!("unexpected SDK call: {call:?}");
        }
    }

    pub async fn expect_authorize(&self) -> oneshot::Sender<Result<(), AuthorizeError>> {
        match self.next_call().await {
            PendingCall::Authorize(tx) => tx,
            other => panic!("expected authorize, got {other:?}"),
        }
    }

    pub async fn expect_silent_token(
        &self,
    ) -> oneshot::Sender<Result<Option<AccessToken>, SdkError>> {
        match self.next_call().await {
            PendingCall::SilentToken(tx) => tx,
            other => panic!("expected get_token_silently, got {other:?}"),
        }
    }

    pub async fn expect_fetch_profile(&self) -> oneshot::Sender<Result<UserProfile, SdkError>> {
        match self.next_call().await {
            PendingCall::FetchProfile(tx) => tx,
            other => panic!("expected fetch_profile, got {other:?}"),
        }
    }

    pub async fn expect_sign_out(&self) -> oneshot::Sender<Result<(), SdkError>> {
        match self.next_call().await {
            PendingCall::SignOut(tx) => tx,
            other => panic!("expected sign_out, got {other:?}"),
        }
    }

    pub fn host_resumes(&self) -> usize {
        self.host_resumes.load(Ordering::SeqCst)
    }

    fn park(&self, call: PendingCall) {
        self.calls_tx.send(call).expect("test still listening");
    }
}

#[async_trait]
impl AuthorizationSdk for ManualSdk {
    async fn authorize(&self, scopes: &[Scope]) -> Result<(), AuthorizeError> {
        assert_eq!(scopes, &[Scope::Profile, Scope::PostalCode]);
        let (tx, rx) = oneshot::channel();
        self.park(PendingCall::Authorize(tx));
        rx.await.unwrap_or(Err(AuthorizeError::Cancelled))
    }

    async fn get_token_silently(&self, scopes: &[Scope]) -> Result<Option<AccessToken>, SdkError> {
        assert_eq!(scopes, &[Scope::Profile, Scope::PostalCode]);
        let (tx, rx) = oneshot::channel();
        self.park(PendingCall::SilentToken(tx));
        rx.await.unwrap_or(Ok(None))
    }

    async fn fetch_profile(&self) -> Result<UserProfile, SdkError> {
        let (tx, rx) = oneshot::channel();
        self.park(PendingCall::FetchProfile(tx));
        rx.await
            .unwrap_or_else(|_| Err(SdkError::Service("test dropped call".to_string())))
    }

    async fn sign_out(&self) -> Result<(), SdkError> {
        let (tx, rx) = oneshot::channel();
        self.park(PendingCall::SignOut(tx));
        rx.await
            .unwrap_or_else(|_| Err(SdkError::Service("test dropped call".to_string())))
    }

    fn on_host_resumed(&self) {
        self.host_resumes.fetch_add(1, Ordering::SeqCst);
    }
}

/// One call received by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    LoggedOut(String),
    LoggingIn,
    LoggedIn(Profile),
    Notice(Notice),
}

/// Presenter that records every call; clones share the log.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    log: Arc<Mutex<Vec<Shown>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.log.lock().expect("presenter log poisoned").clone()
    }

    fn push(&self, shown: Shown) {
        self.log.lock().expect("presenter log poisoned").push(shown);
    }
}

impl Presenter for RecordingPresenter {
    fn show_logged_out(&mut self, prompt: &str) {
        self.push(Shown::LoggedOut(prompt.to_string()));
    }

    fn show_logging_in(&mut self) {
        self.push(Shown::LoggingIn);
    }

    fn show_logged_in(&mut self, profile: &Profile) {
        self.push(Shown::LoggedIn(profile.clone()));
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.push(Shown::Notice(notice.clone()));
    }
}

pub fn user(name: &str, email: &str, account_id: &str, postal_code: Option<&str>) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: email.to_string(),
        account_id: account_id.to_string(),
        postal_code: postal_code.map(String::from),
    }
}

pub fn ana(postal_code: &str) -> UserProfile {
    user("Ana", "a@x.com", "123", Some(postal_code))
}

/// Give the controller and SDK tasks a chance to run.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
    tokio::time::sleep(Duration::from_millis(20)).await;
}

pub async fn wait_for_kind(state: &mut watch::Receiver<UiState>, kind: StateKind) -> UiState {
    tokio::time::timeout(WAIT, state.wait_for(|s| s.kind() == kind))
        .await
        .expect("state change within timeout")
        .expect("controller alive")
        .clone()
}

pub async fn next_event(events: &mut broadcast::Receiver<ScreenEvent>) -> ScreenEventPayload {
    tokio::time::timeout(WAIT, events.recv())
        .await
        .expect("event within timeout")
        .expect("event channel open")
        .payload
}

/// Drain whatever events are already queued.
pub async fn queued_events(events: &mut broadcast::Receiver<ScreenEvent>) -> Vec<ScreenEventPayload> {
    settle().await;
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event.payload);
    }
    out
}

pub fn state_kinds(payloads: &[ScreenEventPayload]) -> Vec<StateKind> {
    payloads
        .iter()
        .filter_map(|payload| match payload {
            ScreenEventPayload::StateChanged { state } => Some(state.kind()),
            ScreenEventPayload::Notice { .. } => None,
        })
        .collect()
}
