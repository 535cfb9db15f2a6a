//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod identity;
mod invitation;
pub mod logging;
mod party;
mod suggestion;

pub use identity::IdentityService;
pub use invitation::InvitationService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use party::PartyService;
pub use suggestion::SuggestionService;
