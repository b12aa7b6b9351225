//! Sign-in session state, transitions and the controller that drives them.

pub mod controller;
pub mod events;
pub mod failure;
pub mod machine;
pub mod state;
pub mod view;

pub use controller::AuthSessionController;
pub use events::{ScreenEvent, ScreenEventPayload};
pub use failure::{AuthFlowError, Notice, NoticeKind};
pub use machine::{Effect, Input, RequestId, SdkCall, SessionMachine};
pub use state::{Profile, StateKind, UiState};
pub use view::{NullPresenter, Presenter, ScreenView};
