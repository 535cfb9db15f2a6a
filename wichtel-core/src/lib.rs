//! Wichtel Core - Business logic for the Secret Santa organizer
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Party, Invitation, GiftSuggestion, etc.)
//! - **ports**: Trait definitions for external dependencies (the per-entity stores)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (the JSON file store)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::JsonFileStore;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    Assignment, GiftSuggestion, Invitation, InvitationStatus, Participant, Party, PartyStatus,
    SessionUser, User,
};

/// Main context for Wichtel operations
///
/// This is the primary entry point for all business logic. It holds the
/// store, configuration, and all services.
pub struct WichtelContext {
    pub config: Config,
    pub store: Arc<JsonFileStore>,
    pub identity_service: IdentityService,
    pub party_service: PartyService,
    pub invitation_service: InvitationService,
    pub suggestion_service: SuggestionService,
}

impl WichtelContext {
    /// Create a new Wichtel context rooted at the given data directory
    pub fn new(wichtel_dir: &Path) -> Result<Self> {
        let config = Config::load(wichtel_dir)?;
        Self::with_config(wichtel_dir, config)
    }

    /// Create a context with an explicit configuration (tests use this to
    /// strip the simulated latency)
    pub fn with_config(wichtel_dir: &Path, config: Config) -> Result<Self> {
        let store = Arc::new(JsonFileStore::new(wichtel_dir)?);

        let identity_service = IdentityService::new(
            Arc::clone(&store) as _,
            Arc::clone(&store) as _,
            config.simulated_latency(),
        );
        let party_service =
            PartyService::new(Arc::clone(&store) as _, Arc::clone(&store) as _);
        let invitation_service =
            InvitationService::new(Arc::clone(&store) as _, Arc::clone(&store) as _);
        let suggestion_service =
            SuggestionService::new(Arc::clone(&store) as _, Arc::clone(&store) as _);

        Ok(Self {
            config,
            store,
            identity_service,
            party_service,
            invitation_service,
            suggestion_service,
        })
    }
}
