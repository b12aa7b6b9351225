use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A named permission over one category of profile data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Scope {
    /// Name, email and account identifier.
    Profile,
    /// Postal code on file with the provider.
    PostalCode,
}

/// Scopes requested by every login and silent-resume call.
pub const LOGIN_SCOPES: [Scope; 2] = [Scope::Profile, Scope::PostalCode];
