//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

pub mod assignment;
mod invitation;
mod party;
pub mod result;
mod suggestion;
mod user;

pub use assignment::{generate_assignments, Assignment};
pub use invitation::{Invitation, InvitationStatus};
pub use party::{Participant, Party, PartyStatus, MIN_LAUNCH_PARTICIPANTS};
pub use suggestion::GiftSuggestion;
pub use user::{normalize_email, SessionUser, User};
