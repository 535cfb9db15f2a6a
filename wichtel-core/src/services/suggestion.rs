//! Gift suggestion service

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{GiftSuggestion, Party, SessionUser};
use crate::ports::{PartyStore, SuggestionStore};

/// Gift suggestion service over the suggestion and party stores
pub struct SuggestionService {
    suggestions: Arc<dyn SuggestionStore>,
    parties: Arc<dyn PartyStore>,
}

impl SuggestionService {
    pub fn new(suggestions: Arc<dyn SuggestionStore>, parties: Arc<dyn PartyStore>) -> Self {
        Self {
            suggestions,
            parties,
        }
    }

    /// Add a gift idea for a participant of the party
    ///
    /// Any party member may suggest, for any participant including
    /// themselves; nothing stops a participant from browsing their own
    /// ideas either.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_suggestion(
        &self,
        party_id: &str,
        target_participant_id: &str,
        title: &str,
        description: Option<&str>,
        price: Option<Decimal>,
        url: Option<&str>,
        user: &SessionUser,
    ) -> Result<GiftSuggestion> {
        let party = self.require_party(party_id).await?;
        if !party.is_member(&user.id) {
            return Err(Error::forbidden("only party participants can suggest gifts"));
        }
        if !party.is_member(target_participant_id) {
            return Err(Error::validation(
                "the selected person is not a participant of this party",
            ));
        }
        let suggestion = GiftSuggestion::new(
            target_participant_id,
            title,
            description,
            price,
            url,
            &user.id,
        )?;
        self.suggestions.add_suggestion(&suggestion).await?;
        Ok(suggestion)
    }

    /// Delete a suggestion; only its creator may
    pub async fn remove_suggestion(&self, suggestion_id: &str, user: &SessionUser) -> Result<()> {
        let suggestion = self
            .suggestions
            .get_suggestion(suggestion_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("suggestion {}", suggestion_id)))?;
        if !suggestion.was_added_by(&user.id) {
            return Err(Error::forbidden(
                "only the person who added a suggestion can remove it",
            ));
        }
        self.suggestions.delete_suggestion(&suggestion.id).await
    }

    /// All suggestions whose target is currently a participant of the party
    ///
    /// This is a computed join against the party's present membership, not
    /// a persisted relation; ideas for removed participants drop out.
    pub async fn suggestions_for_party(&self, party_id: &str) -> Result<Vec<GiftSuggestion>> {
        let party = self.require_party(party_id).await?;
        let mut suggestions = self.suggestions.list_suggestions().await?;
        suggestions.retain(|s| party.is_member(&s.participant_id));
        suggestions.sort_by(|a, b| a.added_at.cmp(&b.added_at));
        Ok(suggestions)
    }

    /// Suggestions for one participant of the party
    pub async fn suggestions_for_participant(
        &self,
        party_id: &str,
        participant_id: &str,
    ) -> Result<Vec<GiftSuggestion>> {
        let mut suggestions = self.suggestions_for_party(party_id).await?;
        suggestions.retain(|s| s.participant_id == participant_id);
        Ok(suggestions)
    }

    async fn require_party(&self, party_id: &str) -> Result<Party> {
        self.parties
            .get_party(party_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("party {}", party_id)))
    }
}
