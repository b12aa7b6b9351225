//! Authorization SDK contract and an in-process scripted implementation.

pub mod error;
pub mod scope;
pub mod scripted;
pub mod sdk;
pub mod token;

pub use error::SdkError;
pub use scope::{Scope, LOGIN_SCOPES};
pub use scripted::{ScriptedSdk, SdkScript};
pub use sdk::{AuthorizationSdk, AuthorizeError, UserProfile};
pub use token::AccessToken;
