//! Repository ports - storage abstraction
//!
//! One trait per entity collection, with atomic per-record operations.
//! The core depends only on these traits; the JSON file store in
//! `adapters` is the concrete implementation.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{GiftSuggestion, Invitation, Party, SessionUser, User};

/// Registered user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user
    async fn add_user(&self, user: &User) -> Result<()>;

    /// Look up a user by normalized email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get all users
    async fn list_users(&self) -> Result<Vec<User>>;
}

/// The single persisted session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Establish the current session
    async fn put_session(&self, user: &SessionUser) -> Result<()>;

    /// Read the current session, if any
    async fn get_session(&self) -> Result<Option<SessionUser>>;

    /// Clear the current session; idempotent
    async fn clear_session(&self) -> Result<()>;
}

/// Party records
#[async_trait]
pub trait PartyStore: Send + Sync {
    /// Persist a new party
    async fn add_party(&self, party: &Party) -> Result<()>;

    /// Get a party by id
    async fn get_party(&self, id: &str) -> Result<Option<Party>>;

    /// Get all parties
    async fn list_parties(&self) -> Result<Vec<Party>>;

    /// Get parties the user created or participates in
    async fn parties_for_user(&self, user_id: &str) -> Result<Vec<Party>>;

    /// Replace a stored party record
    ///
    /// `base_version` is the version the caller read before mutating;
    /// a stale base fails with `Conflict` and leaves the stored record
    /// untouched. On success the stored version is `base_version + 1`.
    async fn update_party(&self, party: &Party, base_version: u64) -> Result<Party>;
}

/// Invitation records; never deleted
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Persist a new invitation
    async fn add_invitation(&self, invitation: &Invitation) -> Result<()>;

    /// Get an invitation by id
    async fn get_invitation(&self, id: &str) -> Result<Option<Invitation>>;

    /// Replace a stored invitation record
    async fn update_invitation(&self, invitation: &Invitation) -> Result<()>;

    /// Get invitations addressed to an email, newest first
    async fn invitations_for_email(&self, email: &str) -> Result<Vec<Invitation>>;

    /// Get all invitations
    async fn list_invitations(&self) -> Result<Vec<Invitation>>;
}

/// Gift suggestion records
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Persist a new suggestion
    async fn add_suggestion(&self, suggestion: &GiftSuggestion) -> Result<()>;

    /// Get a suggestion by id
    async fn get_suggestion(&self, id: &str) -> Result<Option<GiftSuggestion>>;

    /// Delete a suggestion; fails with `NotFound` when absent
    async fn delete_suggestion(&self, id: &str) -> Result<()>;

    /// Get all suggestions
    async fn list_suggestions(&self) -> Result<Vec<GiftSuggestion>>;
}
