//! Gift suggestion domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};

/// A free-form gift idea attached to a target participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftSuggestion {
    pub id: String,
    /// The participant this idea is for
    pub participant_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The user who added the idea; only they may delete it
    pub added_by: String,
    pub added_at: DateTime<Utc>,
}

impl GiftSuggestion {
    /// Create a suggestion with a fresh id and timestamp
    pub fn new(
        participant_id: &str,
        title: &str,
        description: Option<&str>,
        price: Option<Decimal>,
        url: Option<&str>,
        added_by: &str,
    ) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::validation("a gift title is required"));
        }
        if participant_id.trim().is_empty() {
            return Err(Error::validation("a target participant is required"));
        }
        if let Some(p) = price {
            if p.is_sign_negative() {
                return Err(Error::validation("price must be a positive amount"));
            }
        }
        let url = match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(raw) => {
                let parsed = url::Url::parse(raw)
                    .map_err(|_| Error::validation(format!("'{}' is not a valid link", raw)))?;
                Some(parsed.to_string())
            }
            None => None,
        };
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            participant_id: participant_id.to_string(),
            title: title.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            price,
            url,
            added_by: added_by.to_string(),
            added_at: Utc::now(),
        })
    }

    pub fn was_added_by(&self, user_id: &str) -> bool {
        self.added_by == user_id
    }
}
