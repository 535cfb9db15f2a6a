//! Party domain model
//!
//! A party owns two positionally correlated lists: the ordered participant
//! ids and the matching detail records. Every mutation goes through the
//! methods here so the lists never drift apart, the creator stays at
//! index 0, and nothing changes after launch.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::assignment::Assignment;
use crate::domain::result::{Error, Result};
use crate::domain::user::{normalize_email, SessionUser};

/// Minimum participant count for a launch
pub const MIN_LAUNCH_PARTICIPANTS: usize = 3;

/// Party lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
    Draft,
    Active,
    Completed,
}

impl PartyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyStatus::Draft => "draft",
            PartyStatus::Active => "active",
            PartyStatus::Completed => "completed",
        }
    }
}

/// A person taking part in a party
///
/// Participants are party-scoped and need no account; a participant id
/// only coincides with a user id once that user created or accepted into
/// the party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Participant {
    /// Create a participant with a fresh id, trimming the name and
    /// lowercasing the email
    pub fn new(name: &str, email: &str) -> Result<Self> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() || email.is_empty() {
            return Err(Error::validation(
                "participant name and email are both required",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email,
        })
    }
}

/// A single gift-exchange event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub created_by_name: String,
    /// Ordered participant ids; the creator is always first
    pub participants: Vec<String>,
    /// Detail records, kept in lockstep with `participants`
    pub participant_details: Vec<Participant>,
    pub status: PartyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launched_at: Option<DateTime<Utc>>,
    /// Present once the party is launched; immutable thereafter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Vec<Assignment>>,
    /// Optimistic-concurrency stamp, bumped by the store on every update
    #[serde(default)]
    pub version: u64,
}

impl Party {
    /// Create a draft party with the creator as first participant
    pub fn new(
        creator: &SessionUser,
        name: &str,
        description: &str,
        min_value: Option<Decimal>,
    ) -> Result<Self> {
        Self::validate_basic_info(name, description, min_value)?;
        let creator_entry = Participant {
            id: creator.id.clone(),
            name: creator.name.clone(),
            email: normalize_email(&creator.email),
        };
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            created_by: creator.id.clone(),
            created_by_name: creator.name.clone(),
            participants: vec![creator.id.clone()],
            participant_details: vec![creator_entry],
            status: PartyStatus::Draft,
            min_value,
            created_at: Utc::now(),
            launched_at: None,
            assignments: None,
            version: 0,
        })
    }

    /// Shared validation for creation and basic-info updates
    pub fn validate_basic_info(
        name: &str,
        description: &str,
        min_value: Option<Decimal>,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::validation("party name is required"));
        }
        if description.trim().is_empty() {
            return Err(Error::validation("party description is required"));
        }
        if let Some(v) = min_value {
            if v.is_sign_negative() {
                return Err(Error::validation(
                    "minimum gift value must be a positive amount",
                ));
            }
        }
        Ok(())
    }

    pub fn is_draft(&self) -> bool {
        self.status == PartyStatus::Draft
    }

    /// Reject mutations once the party has been launched
    pub fn ensure_draft(&self) -> Result<()> {
        if self.is_draft() {
            Ok(())
        } else {
            Err(Error::validation(
                "this party has already been launched and can no longer be changed",
            ))
        }
    }

    /// Apply a basic-info edit (draft only)
    pub fn update_basic_info(
        &mut self,
        name: &str,
        description: &str,
        min_value: Option<Decimal>,
    ) -> Result<()> {
        self.ensure_draft()?;
        Self::validate_basic_info(name, description, min_value)?;
        self.name = name.trim().to_string();
        self.description = description.trim().to_string();
        self.min_value = min_value;
        Ok(())
    }

    /// Append a participant to both lists (draft only)
    ///
    /// Fails with `DuplicateParticipant` when the email is already present,
    /// compared case-insensitively.
    pub fn add_participant(&mut self, name: &str, email: &str) -> Result<Participant> {
        self.ensure_draft()?;
        let participant = Participant::new(name, email)?;
        if self.has_email(&participant.email) {
            return Err(Error::DuplicateParticipant(participant.email));
        }
        self.participants.push(participant.id.clone());
        self.participant_details.push(participant.clone());
        Ok(participant)
    }

    /// Remove a participant from both lists (draft only)
    ///
    /// Removing the creator is forbidden. Returns whether anything was
    /// removed; an unknown id is a no-op.
    pub fn remove_participant(&mut self, participant_id: &str) -> Result<bool> {
        self.ensure_draft()?;
        if participant_id == self.created_by {
            return Err(Error::forbidden(
                "the party creator cannot be removed from the party",
            ));
        }
        let before = self.participants.len();
        self.participants.retain(|id| id != participant_id);
        self.participant_details.retain(|p| p.id != participant_id);
        Ok(self.participants.len() < before)
    }

    /// Swap a placeholder participant for the account holder who accepted
    /// the invitation, in both lists
    ///
    /// Falls back to appending when the placeholder was removed in the
    /// meantime. Fails with `DuplicateParticipant` if the account holder
    /// is already in the party under a different entry.
    pub fn adopt_participant(&mut self, placeholder_id: &str, user: &SessionUser) -> Result<()> {
        self.ensure_draft()?;
        if self.participants.iter().any(|id| id == &user.id) {
            return Err(Error::DuplicateParticipant(normalize_email(&user.email)));
        }
        let adopted = Participant {
            id: user.id.clone(),
            name: user.name.clone(),
            email: normalize_email(&user.email),
        };
        match self.participants.iter().position(|id| id == placeholder_id) {
            Some(pos) => {
                self.participants[pos] = adopted.id.clone();
                let detail_pos = self
                    .participant_details
                    .iter()
                    .position(|p| p.id == placeholder_id)
                    .ok_or_else(|| Error::storage("participant lists out of step"))?;
                self.participant_details[detail_pos] = adopted;
            }
            None => {
                self.participants.push(adopted.id.clone());
                self.participant_details.push(adopted);
            }
        }
        Ok(())
    }

    /// Mark the party launched with the drawn assignments
    pub fn launch(&mut self, assignments: Vec<Assignment>) -> Result<()> {
        self.ensure_draft()?;
        if self.participants.len() < MIN_LAUNCH_PARTICIPANTS {
            return Err(Error::InsufficientParticipants {
                required: MIN_LAUNCH_PARTICIPANTS,
                found: self.participants.len(),
            });
        }
        self.status = PartyStatus::Active;
        self.launched_at = Some(Utc::now());
        self.assignments = Some(assignments);
        Ok(())
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participant_details.iter().find(|p| p.id == participant_id)
    }

    pub fn has_email(&self, email: &str) -> bool {
        let email = normalize_email(email);
        self.participant_details.iter().any(|p| p.email == email)
    }

    pub fn is_member(&self, participant_id: &str) -> bool {
        self.participants.iter().any(|id| id == participant_id)
    }

    /// The participant a giver draws in an active party
    pub fn receiver_for(&self, giver_id: &str) -> Option<&Participant> {
        let assignments = self.assignments.as_ref()?;
        let assignment = assignments.iter().find(|a| a.giver == giver_id)?;
        self.participant(&assignment.receiver)
    }

    /// Verify the two participant lists are in lockstep
    pub fn check_integrity(&self) -> Result<()> {
        if self.participants.len() != self.participant_details.len() {
            return Err(Error::storage("participant lists out of step"));
        }
        for id in &self.participants {
            if self.participant(id).is_none() {
                return Err(Error::storage(format!(
                    "participant {} has no detail record",
                    id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator() -> SessionUser {
        SessionUser {
            id: "creator-1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    fn draft_party() -> Party {
        Party::new(&creator(), "Office Party", "Annual exchange", None).unwrap()
    }

    #[test]
    fn test_creator_is_first_participant() {
        let party = draft_party();
        assert_eq!(party.participants, vec!["creator-1"]);
        assert_eq!(party.participant_details[0].email, "alice@example.com");
        assert_eq!(party.status, PartyStatus::Draft);
        party.check_integrity().unwrap();
    }

    #[test]
    fn test_basic_info_validation() {
        assert!(Party::new(&creator(), "", "desc", None).is_err());
        assert!(Party::new(&creator(), "name", "  ", None).is_err());
        assert!(Party::new(&creator(), "name", "desc", Some(Decimal::new(-5, 0))).is_err());
        assert!(Party::new(&creator(), "name", "desc", Some(Decimal::new(25, 0))).is_ok());
    }

    #[test]
    fn test_duplicate_participant_email_rejected() {
        let mut party = draft_party();
        party.add_participant("Bob", "bob@example.com").unwrap();
        let err = party.add_participant("Bobby", "BOB@Example.com").unwrap_err();
        assert!(matches!(err, Error::DuplicateParticipant(_)));
        // Both lists untouched by the failed add
        assert_eq!(party.participants.len(), 2);
        assert_eq!(party.participant_details.len(), 2);
    }

    #[test]
    fn test_creator_email_counts_as_duplicate() {
        let mut party = draft_party();
        let err = party.add_participant("Alice Clone", "alice@example.com").unwrap_err();
        assert!(matches!(err, Error::DuplicateParticipant(_)));
    }

    #[test]
    fn test_remove_participant() {
        let mut party = draft_party();
        let bob = party.add_participant("Bob", "bob@example.com").unwrap();
        assert!(party.remove_participant(&bob.id).unwrap());
        assert!(!party.remove_participant(&bob.id).unwrap());
        party.check_integrity().unwrap();
    }

    #[test]
    fn test_creator_cannot_be_removed() {
        let mut party = draft_party();
        let err = party.remove_participant("creator-1").unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert_eq!(party.participants.len(), 1);
    }

    #[test]
    fn test_launch_requires_three_participants() {
        let mut party = draft_party();
        party.add_participant("Bob", "bob@example.com").unwrap();
        let err = party.launch(vec![]).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientParticipants { required: 3, found: 2 }
        ));
        assert!(party.is_draft());
    }

    #[test]
    fn test_no_mutation_after_launch() {
        let mut party = draft_party();
        party.add_participant("Bob", "bob@example.com").unwrap();
        party.add_participant("Carol", "carol@example.com").unwrap();
        party.launch(vec![]).unwrap();
        assert_eq!(party.status, PartyStatus::Active);
        assert!(party.launched_at.is_some());

        assert!(party.add_participant("Dan", "dan@example.com").is_err());
        assert!(party.remove_participant("creator-1").is_err());
        assert!(party.update_basic_info("x", "y", None).is_err());
        assert!(party.launch(vec![]).is_err());
    }

    #[test]
    fn test_adopt_participant_replaces_placeholder() {
        let mut party = draft_party();
        let bob = party.add_participant("Bob", "bob@example.com").unwrap();
        let account = SessionUser {
            id: "user-bob".to_string(),
            name: "Bob R".to_string(),
            email: "Bob@Example.com".to_string(),
        };
        party.adopt_participant(&bob.id, &account).unwrap();
        assert!(party.is_member("user-bob"));
        assert!(!party.is_member(&bob.id));
        assert_eq!(party.participant("user-bob").unwrap().email, "bob@example.com");
        party.check_integrity().unwrap();
    }

    #[test]
    fn test_party_serializes_with_camel_case_keys() {
        let party = draft_party();
        let json = serde_json::to_value(&party).unwrap();
        assert!(json.get("createdBy").is_some());
        assert!(json.get("participantDetails").is_some());
        // Optional fields stay absent until set
        assert!(json.get("minValue").is_none());
        assert!(json.get("assignments").is_none());
    }
}
