//! User domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};

/// A registered account holder
///
/// The password is stored as entered. There is deliberately no hashing or
/// credential hardening in this system; the store is a stand-in backend on
/// the user's own machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Normalized to lowercase at creation
    pub email: String,
    pub password: String,
}

impl User {
    /// Create a new user with a fresh id, trimming inputs and
    /// lowercasing the email
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() {
            return Err(Error::validation("name is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(Error::validation("a valid email address is required"));
        }
        if password.is_empty() {
            return Err(Error::validation("password is required"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email,
            password: password.to_string(),
        })
    }

    /// The session-visible subset of this user
    pub fn session_view(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The current-session projection of a user (no credential material)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Lowercase and trim an email for comparison and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
