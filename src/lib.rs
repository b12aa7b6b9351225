//! Signin: authentication-session controller for a profile sign-in screen.
//!
//! The screen signs a user in through a third-party authorization SDK, shows a
//! short profile summary and offers sign-out. [`session::AuthSessionController`]
//! owns the state machine; the SDK sits behind [`auth::AuthorizationSdk`] and
//! the screen behind [`session::Presenter`].
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use signin::auth::{ScriptedSdk, SdkScript};
//! use signin::config::SigninConfig;
//! use signin::session::{AuthSessionController, NullPresenter, StateKind};
//!
//! # async fn example() -> signin::error::Result<()> {
//! let config = SigninConfig::load(None)?;
//! let sdk = Arc::new(ScriptedSdk::new(SdkScript::default()));
//! let controller = AuthSessionController::spawn(sdk, Box::new(NullPresenter), &config);
//!
//! let mut state = controller.watch_state();
//! controller.start_interactive_login()?;
//! while state.borrow_and_update().kind() != StateKind::LoggedIn {
//!     state.changed().await.ok();
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;
