//! Party service - party lifecycle and participant management

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::result::{Error, Result};
use crate::domain::{
    generate_assignments, Invitation, Participant, Party, SessionUser,
};
use crate::ports::{InvitationStore, PartyStore};

/// Party service over the party and invitation stores
pub struct PartyService {
    parties: Arc<dyn PartyStore>,
    invitations: Arc<dyn InvitationStore>,
}

impl PartyService {
    pub fn new(parties: Arc<dyn PartyStore>, invitations: Arc<dyn InvitationStore>) -> Self {
        Self {
            parties,
            invitations,
        }
    }

    /// Create a draft party with the creator plus the supplied people,
    /// recording a pending invitation for each of them
    pub async fn create_party(
        &self,
        creator: &SessionUser,
        name: &str,
        description: &str,
        min_value: Option<rust_decimal::Decimal>,
        participants: &[(String, String)],
    ) -> Result<Party> {
        if participants.len() < 2 {
            return Err(Error::validation(
                "at least 2 participants besides you are needed for a Secret Santa party",
            ));
        }

        let mut party = Party::new(creator, name, description, min_value)?;
        let mut added = Vec::with_capacity(participants.len());
        for (p_name, p_email) in participants {
            added.push(party.add_participant(p_name, p_email)?);
        }
        self.parties.add_party(&party).await?;

        for participant in &added {
            let invitation = Invitation::new(&party, participant, creator);
            self.invitations.add_invitation(&invitation).await?;
        }
        Ok(party)
    }

    /// Get a party the user belongs to
    pub async fn view_party(&self, party_id: &str, user: &SessionUser) -> Result<Party> {
        let party = self.require_party(party_id).await?;
        if party.created_by != user.id && !party.is_member(&user.id) {
            return Err(Error::forbidden("you are not part of this party"));
        }
        Ok(party)
    }

    /// Get a party for management; only the creator may manage
    pub async fn manage_party(&self, party_id: &str, user: &SessionUser) -> Result<Party> {
        let party = self.require_party(party_id).await?;
        if party.created_by != user.id {
            return Err(Error::forbidden(
                "you don't have permission to manage this party",
            ));
        }
        Ok(party)
    }

    /// Parties the user created or participates in
    pub async fn list_for_user(&self, user: &SessionUser) -> Result<Vec<Party>> {
        let mut parties = self.parties.parties_for_user(&user.id).await?;
        parties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(parties)
    }

    /// Edit name, description, and minimum gift value (draft only)
    pub async fn update_basic_info(
        &self,
        party_id: &str,
        requester: &SessionUser,
        name: &str,
        description: &str,
        min_value: Option<rust_decimal::Decimal>,
    ) -> Result<Party> {
        let mut party = self.manage_party(party_id, requester).await?;
        let base_version = party.version;
        party.update_basic_info(name, description, min_value)?;
        self.parties.update_party(&party, base_version).await
    }

    /// Add a participant and record their pending invitation (draft only)
    pub async fn add_participant(
        &self,
        party_id: &str,
        requester: &SessionUser,
        name: &str,
        email: &str,
    ) -> Result<(Party, Invitation)> {
        let mut party = self.manage_party(party_id, requester).await?;
        let base_version = party.version;
        let participant = party.add_participant(name, email)?;
        let party = self.parties.update_party(&party, base_version).await?;

        let invitation = Invitation::new(&party, &participant, requester);
        self.invitations.add_invitation(&invitation).await?;
        Ok((party, invitation))
    }

    /// Remove a participant from both lists (draft only, never the creator)
    ///
    /// An unknown participant id is a no-op, reported via the flag.
    pub async fn remove_participant(
        &self,
        party_id: &str,
        requester: &SessionUser,
        participant_id: &str,
    ) -> Result<(Party, bool)> {
        let mut party = self.manage_party(party_id, requester).await?;
        let base_version = party.version;
        let removed = party.remove_participant(participant_id)?;
        if !removed {
            return Ok((party, false));
        }
        let party = self.parties.update_party(&party, base_version).await?;
        Ok((party, true))
    }

    /// Draw assignments and activate the party; irreversible
    pub async fn launch(&self, party_id: &str, requester: &SessionUser) -> Result<Party> {
        let mut party = self.manage_party(party_id, requester).await?;
        let base_version = party.version;
        let mut rng = StdRng::from_entropy();
        let assignments = generate_assignments(&party.participants, &mut rng);
        party.launch(assignments)?;
        self.parties.update_party(&party, base_version).await
    }

    /// The participant the user gives to in an active party
    pub async fn my_target(
        &self,
        party_id: &str,
        user: &SessionUser,
    ) -> Result<Option<Participant>> {
        let party = self.view_party(party_id, user).await?;
        Ok(party.receiver_for(&user.id).cloned())
    }

    async fn require_party(&self, party_id: &str) -> Result<Party> {
        self.parties
            .get_party(party_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("party {}", party_id)))
    }
}
