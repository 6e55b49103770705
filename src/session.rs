//! Per-user card state: the current batch of cards, the active cursor and
//! bingo win notifications.
//!
//! A session owns all of its mutable state. The word bank is shared read-only
//! through an `Arc`, so any number of sessions can run side by side without
//! seeing each other's cards.

use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

use crate::card::{Card, CardGenerator};
use crate::error::{BingoError, Result};
use crate::registry::CardRegistry;
use crate::shuffle::RandomSource;
use crate::win::Line;
use crate::word_bank::WordBank;

pub const DEFAULT_MAX_CARDS: usize = 20;

/// Sibling cards generated together, with one active card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    meeting_type: String,
    cards: Vec<Card>,
    active_card_index: usize,
}

impl CardSet {
    pub fn meeting_type(&self) -> &str {
        &self.meeting_type
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn active_card_index(&self) -> usize {
        self.active_card_index
    }

    pub fn active_card(&self) -> &Card {
        &self.cards[self.active_card_index]
    }
}

/// Raised once per false-to-true bingo transition of the active card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoEvent {
    pub card_index: usize,
    pub card_id: u64,
    pub lines: Vec<Line>,
}

pub struct CardSession<S: RandomSource> {
    bank: Arc<WordBank>,
    source: S,
    registry: CardRegistry,
    card_set: Option<CardSet>,
    strict_meeting_types: bool,
    max_cards: usize,
}

impl<S: RandomSource> CardSession<S> {
    pub fn new(bank: Arc<WordBank>, source: S) -> Self {
        Self {
            bank,
            source,
            registry: CardRegistry::new(),
            card_set: None,
            strict_meeting_types: false,
            max_cards: DEFAULT_MAX_CARDS,
        }
    }

    /// Reject unknown meeting types instead of substituting the default.
    pub fn with_strict_meeting_types(mut self, strict: bool) -> Self {
        self.strict_meeting_types = strict;
        self
    }

    pub fn with_max_cards(mut self, max_cards: usize) -> Self {
        self.max_cards = max_cards.max(1);
        self
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn max_cards(&self) -> usize {
        self.max_cards
    }

    pub fn card_set(&self) -> Option<&CardSet> {
        self.card_set.as_ref()
    }

    pub fn active_card(&self) -> Option<&Card> {
        self.card_set.as_ref().map(CardSet::active_card)
    }

    /// Replaces the whole card set. On error the previous set is kept.
    pub fn generate(&mut self, meeting_type: &str, num_cards: usize) -> Result<&CardSet> {
        if num_cards == 0 || num_cards > self.max_cards {
            return Err(BingoError::InvalidRequest(format!(
                "numCards must be between 1 and {}, got {num_cards}",
                self.max_cards
            )));
        }
        if self.strict_meeting_types && !self.bank.contains(meeting_type) {
            return Err(BingoError::UnknownMeetingType {
                meeting_type: meeting_type.to_string(),
            });
        }
        let cards = CardGenerator::new(&self.bank).generate_cards(
            meeting_type,
            num_cards,
            &mut self.source,
            &mut self.registry,
        )?;
        if let Some(old) = self.card_set.take() {
            self.registry.forget(old.cards.iter().map(Card::id));
        }
        let meeting_type = cards[0].meeting_type().to_string();
        debug!("new card set: {num_cards} x {meeting_type}");
        Ok(&*self.card_set.insert(CardSet {
            meeting_type,
            cards,
            active_card_index: 0,
        }))
    }

    /// Flips a square on the given card (active card when `None`).
    ///
    /// Returns the bingo event when this toggle completed the first line on
    /// the active card.
    pub fn toggle_square(
        &mut self,
        index: usize,
        card_index: Option<usize>,
    ) -> Result<Option<BingoEvent>> {
        let set = self.card_set.as_mut().ok_or(BingoError::NoCards)?;
        let target = resolve_card_index(set, card_index)?;
        let card = &mut set.cards[target];
        let had_bingo = card.has_bingo();
        card.toggle(index)?;

        if target == set.active_card_index && !had_bingo && card.has_bingo() {
            info!(
                "BINGO on card {} ({} line(s))",
                card.id(),
                card.bingo_lines().len()
            );
            return Ok(Some(BingoEvent {
                card_index: target,
                card_id: card.id(),
                lines: card.bingo_lines().to_vec(),
            }));
        }
        Ok(None)
    }

    /// Clears all marks but the free space on the given card.
    pub fn reset_card(&mut self, card_index: Option<usize>) -> Result<()> {
        let set = self.card_set.as_mut().ok_or(BingoError::NoCards)?;
        let target = resolve_card_index(set, card_index)?;
        set.cards[target].reset();
        Ok(())
    }

    pub fn switch_active_card(&mut self, index: usize) -> Result<()> {
        let set = self.card_set.as_mut().ok_or(BingoError::NoCards)?;
        if index >= set.cards.len() {
            return Err(BingoError::InvalidIndex {
                index,
                len: set.cards.len(),
            });
        }
        set.active_card_index = index;
        Ok(())
    }
}

fn resolve_card_index(set: &CardSet, card_index: Option<usize>) -> Result<usize> {
    let index = card_index.unwrap_or(set.active_card_index);
    if index >= set.cards.len() {
        return Err(BingoError::InvalidIndex {
            index,
            len: set.cards.len(),
        });
    }
    Ok(index)
}
