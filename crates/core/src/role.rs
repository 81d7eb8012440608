use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Authorization level of a verified key.
///
/// `None` means the key was not recognized by the registry. It is a role
/// value, distinct from receiving no role at all (see [`KeyType::parse_probe_body`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Admin,
    User,
    Viewer,
    None,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Admin => "admin",
            KeyType::User => "user",
            KeyType::Viewer => "viewer",
            KeyType::None => "none",
        }
    }

    pub fn can_read(&self) -> bool {
        matches!(self, KeyType::Admin | KeyType::User | KeyType::Viewer)
    }

    pub fn can_write(&self) -> bool {
        matches!(self, KeyType::Admin | KeyType::User)
    }

    /// Interprets the full body of a role probe response.
    ///
    /// An empty body is "no response" and yields `Ok(None)`.
    pub fn parse_probe_body(body: &[u8]) -> Result<Option<KeyType>, AuthError> {
        let token = std::str::from_utf8(body)?.trim();
        if token.is_empty() {
            return Ok(None);
        }
        token.parse().map(Some)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(KeyType::Admin),
            "user" => Ok(KeyType::User),
            "viewer" => Ok(KeyType::Viewer),
            "none" => Ok(KeyType::None),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}
