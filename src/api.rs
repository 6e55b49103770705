//! Typed request/response shapes for exposing generation over a transport.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::{BingoError, Result};
use crate::session::{CardSession, CardSet};
use crate::shuffle::RandomSource;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateRequest {
    pub meeting_type: String,
    #[serde(default)]
    pub num_cards: Option<usize>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub meeting_type: String,
    pub num_cards: usize,
}

impl GenerateRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| BingoError::InvalidRequest(e.to_string()))
    }

    pub fn validate(&self, max_cards: usize) -> Result<ValidRequest> {
        let meeting_type = self.meeting_type.trim();
        if meeting_type.is_empty() {
            return Err(BingoError::InvalidRequest("meetingType is required".into()));
        }
        let num_cards = self.num_cards.unwrap_or(1);
        if !(1..=max_cards).contains(&num_cards) {
            return Err(BingoError::InvalidRequest(format!(
                "numCards must be between 1 and {max_cards}, got {num_cards}"
            )));
        }
        Ok(ValidRequest {
            meeting_type: meeting_type.to_string(),
            num_cards,
        })
    }
}

/// One card is returned bare; a batch is wrapped with its cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Single(Card),
    #[serde(rename_all = "camelCase")]
    Batch {
        cards: Vec<Card>,
        meeting_type: String,
        num_cards: usize,
        active_card_index: usize,
    },
}

impl From<&CardSet> for GenerateResponse {
    fn from(set: &CardSet) -> Self {
        match set.cards() {
            [card] => GenerateResponse::Single(card.clone()),
            cards => GenerateResponse::Batch {
                cards: cards.to_vec(),
                meeting_type: set.meeting_type().to_string(),
                num_cards: cards.len(),
                active_card_index: set.active_card_index(),
            },
        }
    }
}

/// Validates `request` and regenerates the session's card set from it.
pub fn handle_generate<S: RandomSource>(
    session: &mut CardSession<S>,
    request: &GenerateRequest,
) -> Result<GenerateResponse> {
    let valid = request.validate(session.max_cards())?;
    let set = session.generate(&valid.meeting_type, valid.num_cards)?;
    Ok(GenerateResponse::from(set))
}
