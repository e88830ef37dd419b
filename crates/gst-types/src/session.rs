//! Authenticated session
//!
//! The token and role returned by the login endpoint. Screens never read
//! ambient storage directly; they ask a [`SessionProvider`], which the console
//! backs with a file and tests back with a plain value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role marker returned by the backend at login
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    User,
    /// Any role string the console does not know, kept verbatim
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(role) => role,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    /// When the session was persisted locally
    #[serde(default)]
    pub stored_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: impl Into<Role>) -> Self {
        Self {
            token: token.into(),
            role: role.into(),
            stored_at: None,
        }
    }

    /// A session whose token is blank carries no authentication
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

/// Source of the current session, injected into every authenticated screen
pub trait SessionProvider {
    fn session(&self) -> Option<Session>;
}

impl SessionProvider for Option<Session> {
    fn session(&self) -> Option<Session> {
        self.clone()
    }
}
