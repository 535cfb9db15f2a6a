//! Identity service - signup, login, and the persisted session
//!
//! Credentials are stored and compared in plaintext; this is a stand-in
//! for a real backend, not a security boundary. Register and authenticate
//! suspend for the configured simulated latency, modeling the backend
//! round-trip the original front-end faked.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::result::{Error, Result};
use crate::domain::{normalize_email, SessionUser, User};
use crate::ports::{SessionStore, UserStore};

/// Identity service over the user and session stores
pub struct IdentityService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    latency: Duration,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        latency: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            latency,
        }
    }

    async fn simulate_backend_call(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Create an account and establish it as the current session
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionUser> {
        self.simulate_backend_call().await;

        let user = User::new(name, email, password)?;
        if self.users.find_user_by_email(&user.email).await?.is_some() {
            return Err(Error::DuplicateEmail(user.email));
        }
        self.users.add_user(&user).await?;

        let session = user.session_view();
        self.sessions.put_session(&session).await?;
        Ok(session)
    }

    /// Log in with an exact email and password match
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<SessionUser> {
        self.simulate_backend_call().await;

        let email = normalize_email(email);
        let user = self
            .users
            .find_user_by_email(&email)
            .await?
            .filter(|u| u.password == password)
            .ok_or(Error::InvalidCredentials)?;

        let session = user.session_view();
        self.sessions.put_session(&session).await?;
        Ok(session)
    }

    /// Read the persisted session, if any
    pub async fn current_user(&self) -> Result<Option<SessionUser>> {
        self.sessions.get_session().await
    }

    /// Like `current_user`, but an absent session is an error
    ///
    /// This is the protected-page entry check: commands that need an
    /// authenticated user call this first.
    pub async fn require_user(&self) -> Result<SessionUser> {
        self.current_user()
            .await?
            .ok_or_else(|| Error::forbidden("you are not logged in; run `wt login` first"))
    }

    /// Clear the current session; idempotent
    pub async fn end_session(&self) -> Result<()> {
        self.sessions.clear_session().await
    }
}
