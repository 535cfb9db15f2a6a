//! Invitation domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::party::{Participant, Party};
use crate::domain::result::{Error, Result};
use crate::domain::user::SessionUser;

/// Invitation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
        }
    }
}

/// A record tracking whether an invited participant has joined a party
///
/// Invitations are never deleted; accepted and declined ones remain
/// visible as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    /// Composite id: `<partyId>-<participantId>`
    pub id: String,
    pub party_id: String,
    pub party_name: String,
    pub invited_by: String,
    pub invited_by_name: String,
    /// The placeholder participant id inside the party
    pub invited_user: String,
    pub invited_user_email: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Create a pending invitation for a participant just added to a party
    pub fn new(party: &Party, participant: &Participant, inviter: &SessionUser) -> Self {
        Self {
            id: format!("{}-{}", party.id, participant.id),
            party_id: party.id.clone(),
            party_name: party.name.clone(),
            invited_by: inviter.id.clone(),
            invited_by_name: inviter.name.clone(),
            invited_user: participant.id.clone(),
            invited_user_email: participant.email.clone(),
            status: InvitationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// Only pending invitations may be answered
    pub fn ensure_pending(&self) -> Result<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "this invitation was already {}",
                self.status.as_str()
            )))
        }
    }
}
