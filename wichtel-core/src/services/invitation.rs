//! Invitation service - answering invitations
//!
//! Accepting an invitation is a two-entity mutation: the invitation is
//! marked accepted and the accepting user joins the party's participant
//! lists. The two steps run as one logical unit; if the party update
//! fails, the invitation status change is rolled back.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{normalize_email, Invitation, InvitationStatus, Party, SessionUser};
use crate::ports::{InvitationStore, PartyStore};

/// Invitation service over the invitation and party stores
pub struct InvitationService {
    invitations: Arc<dyn InvitationStore>,
    parties: Arc<dyn PartyStore>,
}

impl InvitationService {
    pub fn new(invitations: Arc<dyn InvitationStore>, parties: Arc<dyn PartyStore>) -> Self {
        Self {
            invitations,
            parties,
        }
    }

    /// Invitations addressed to the user, newest first; history included
    pub async fn invitations_for(&self, user: &SessionUser) -> Result<Vec<Invitation>> {
        self.invitations.invitations_for_email(&user.email).await
    }

    /// Accept an invitation and join the party
    ///
    /// The user's account takes the place of the placeholder participant
    /// recorded at invite time. Accepting into an already-launched party
    /// fails and leaves both records unchanged.
    pub async fn accept(
        &self,
        invitation_id: &str,
        user: &SessionUser,
    ) -> Result<(Invitation, Party)> {
        let mut invitation = self.require_own_pending(invitation_id, user).await?;

        invitation.status = InvitationStatus::Accepted;
        self.invitations.update_invitation(&invitation).await?;

        match self.join_party(&invitation, user).await {
            Ok(party) => Ok((invitation, party)),
            Err(e) => {
                // Compensate: the acceptance must not stand without the join.
                invitation.status = InvitationStatus::Pending;
                self.invitations.update_invitation(&invitation).await?;
                Err(e)
            }
        }
    }

    /// Decline an invitation; the record stays visible as history
    pub async fn decline(&self, invitation_id: &str, user: &SessionUser) -> Result<Invitation> {
        let mut invitation = self.require_own_pending(invitation_id, user).await?;
        invitation.status = InvitationStatus::Declined;
        self.invitations.update_invitation(&invitation).await?;
        Ok(invitation)
    }

    async fn join_party(&self, invitation: &Invitation, user: &SessionUser) -> Result<Party> {
        let mut party = self
            .parties
            .get_party(&invitation.party_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("party {}", invitation.party_id)))?;
        let base_version = party.version;
        party.adopt_participant(&invitation.invited_user, user)?;
        self.parties.update_party(&party, base_version).await
    }

    async fn require_own_pending(
        &self,
        invitation_id: &str,
        user: &SessionUser,
    ) -> Result<Invitation> {
        let invitation = self
            .invitations
            .get_invitation(invitation_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("invitation {}", invitation_id)))?;
        if invitation.invited_user_email != normalize_email(&user.email) {
            return Err(Error::forbidden("this invitation is addressed to someone else"));
        }
        invitation.ensure_pending()?;
        Ok(invitation)
    }
}
