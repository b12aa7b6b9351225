use std::fmt;

/// Opaque access token handed out by the SDK.
///
/// The session controller only cares whether one exists; the value is never
/// inspected and is redacted from `Debug` output.
///
/// # Example
/// ```
/// use signin::auth::AccessToken;
///
/// let token = AccessToken::new("secret");
/// assert_eq!(format!("{token:?}"), "AccessToken(..)");
/// assert_eq!(format!("{:?}", AccessToken::new("")), "AccessToken(<empty>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccessToken(<empty>)")
        } else {
            f.write_str("AccessToken(..)")
        }
    }
}
