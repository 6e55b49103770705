use log::debug;
use serde::Serialize;

use crate::error::{BingoError, Result};
use crate::registry::CardRegistry;
use crate::shuffle::{RandomSource, shuffled};
use crate::win::{self, Line};
use crate::word_bank::WordBank;

pub const BOARD_SIZE: usize = 5;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
pub const FREE_SPACE_INDEX: usize = TOTAL_CELLS / 2;
pub const FREE_SPACE: &str = "FREE SPACE";
/// Distinct buzzwords needed to fill every cell except the free space.
pub const WORDS_PER_CARD: usize = TOTAL_CELLS - 1;

/// One 5x5 grid with its own layout and mark state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: u64,
    meeting_type: String,
    words: [String; TOTAL_CELLS],
    marked_squares: [bool; TOTAL_CELLS],
    has_bingo: bool,
    bingo_lines: Vec<Line>,
    squares_marked_count: usize,
    bingo_progress: u8,
}

impl Card {
    /// Builds a card with the free space already marked.
    fn materialize(id: u64, meeting_type: &str, words: [String; TOTAL_CELLS]) -> Self {
        let mut marked_squares = [false; TOTAL_CELLS];
        marked_squares[FREE_SPACE_INDEX] = true;
        let mut card = Self {
            id,
            meeting_type: meeting_type.to_string(),
            words,
            marked_squares,
            has_bingo: false,
            bingo_lines: Vec::new(),
            squares_marked_count: 0,
            bingo_progress: 0,
        };
        card.refresh();
        card
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn meeting_type(&self) -> &str {
        &self.meeting_type
    }

    pub fn words(&self) -> &[String; TOTAL_CELLS] {
        &self.words
    }

    pub fn marked_squares(&self) -> &[bool; TOTAL_CELLS] {
        &self.marked_squares
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked_squares.get(index).copied().unwrap_or(false)
    }

    pub fn has_bingo(&self) -> bool {
        self.has_bingo
    }

    pub fn bingo_lines(&self) -> &[Line] {
        &self.bingo_lines
    }

    pub fn squares_marked_count(&self) -> usize {
        self.squares_marked_count
    }

    /// Percentage of marked cells, rounded.
    pub fn bingo_progress(&self) -> u8 {
        self.bingo_progress
    }

    /// True if `index` lies on any completed line.
    pub fn is_on_bingo_line(&self, index: usize) -> bool {
        self.bingo_lines.iter().any(|line| line.contains(&index))
    }

    /// Flips one square. The free space is left untouched.
    pub fn toggle(&mut self, index: usize) -> Result<()> {
        if index >= TOTAL_CELLS {
            return Err(BingoError::InvalidIndex {
                index,
                len: TOTAL_CELLS,
            });
        }
        if index == FREE_SPACE_INDEX {
            return Ok(());
        }
        self.marked_squares[index] = !self.marked_squares[index];
        self.refresh();
        Ok(())
    }

    /// Clears every mark except the free space.
    pub fn reset(&mut self) {
        self.marked_squares = [false; TOTAL_CELLS];
        self.marked_squares[FREE_SPACE_INDEX] = true;
        self.refresh();
    }

    fn refresh(&mut self) {
        let status = win::evaluate(&self.marked_squares);
        self.has_bingo = status.has_bingo;
        self.bingo_lines = status.bingo_lines;
        self.squares_marked_count = self.marked_squares.iter().filter(|&&m| m).count();
        self.bingo_progress =
            (100.0 * self.squares_marked_count as f64 / TOTAL_CELLS as f64).round() as u8;
    }
}

/// Lays out 24 words drawn without replacement from `pool` around the free space.
pub fn layout<S: RandomSource + ?Sized>(
    meeting_type: &str,
    pool: &[String],
    source: &mut S,
) -> Result<[String; TOTAL_CELLS]> {
    if pool.len() < WORDS_PER_CARD {
        return Err(BingoError::InsufficientWords {
            meeting_type: meeting_type.to_string(),
            available: pool.len(),
            required: WORDS_PER_CARD,
        });
    }
    let mut selected = shuffled(pool, source).into_iter().take(WORDS_PER_CARD);
    Ok(std::array::from_fn(|i| {
        if i == FREE_SPACE_INDEX {
            FREE_SPACE.to_string()
        } else {
            selected.next().unwrap_or_default()
        }
    }))
}

/// Produces cards for a meeting type from a word bank.
#[derive(Debug, Clone, Copy)]
pub struct CardGenerator<'a> {
    bank: &'a WordBank,
}

impl<'a> CardGenerator<'a> {
    pub fn new(bank: &'a WordBank) -> Self {
        Self { bank }
    }

    pub fn generate_card<S: RandomSource + ?Sized>(
        &self,
        meeting_type: &str,
        source: &mut S,
        registry: &mut CardRegistry,
    ) -> Result<Card> {
        let mut cards = self.generate_cards(meeting_type, 1, source, registry)?;
        cards
            .pop()
            .ok_or_else(|| BingoError::InvalidRequest("no card generated".into()))
    }

    /// Sibling cards draw independently from one resolved pool.
    pub fn generate_cards<S: RandomSource + ?Sized>(
        &self,
        meeting_type: &str,
        count: usize,
        source: &mut S,
        registry: &mut CardRegistry,
    ) -> Result<Vec<Card>> {
        if count == 0 {
            return Err(BingoError::InvalidRequest(
                "at least one card must be requested".into(),
            ));
        }
        let resolved = self.bank.words_for(meeting_type)?;
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            let words = layout(resolved.meeting_type, resolved.words, source)?;
            let id = registry.register(resolved.meeting_type, &words);
            cards.push(Card::materialize(id, resolved.meeting_type, words));
        }
        debug!(
            "generated {count} card(s) for {} from {} candidates",
            resolved.meeting_type,
            resolved.words.len()
        );
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::SeededSource;
    use crate::word_bank::MeetingType;
    use std::collections::HashSet;

    fn bank_with(count: usize) -> WordBank {
        let words = (0..count).map(|i| format!("Buzzword {i}")).collect();
        WordBank::new(
            vec![MeetingType {
                name: "all-hands".into(),
                display_name: "All Hands".into(),
                words,
            }],
            "all-hands",
        )
        .unwrap()
    }

    fn assert_well_formed(card: &Card, pool: &[String]) {
        assert_eq!(card.words()[FREE_SPACE_INDEX], FREE_SPACE);
        assert!(card.is_marked(FREE_SPACE_INDEX));
        let others: Vec<&String> = card
            .words()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != FREE_SPACE_INDEX)
            .map(|(_, w)| w)
            .collect();
        assert_eq!(others.len(), WORDS_PER_CARD);
        let unique: HashSet<&&String> = others.iter().collect();
        assert_eq!(unique.len(), WORDS_PER_CARD);
        assert!(others.iter().all(|w| pool.contains(w)));
    }

    #[test]
    fn test_generated_card_is_well_formed() {
        let bank = bank_with(30);
        let pool = bank.strict_words_for("all-hands").unwrap().to_vec();
        let mut source = SeededSource::seeded(1);
        let mut registry = CardRegistry::new();
        for _ in 0..50 {
            let card = CardGenerator::new(&bank)
                .generate_card("all-hands", &mut source, &mut registry)
                .unwrap();
            assert_well_formed(&card, &pool);
            assert_eq!(card.squares_marked_count(), 1);
            assert_eq!(card.bingo_progress(), 4);
            assert!(!card.has_bingo());
        }
    }

    #[test]
    fn test_exactly_24_words_uses_all_of_them() {
        let bank = bank_with(24);
        let mut source = SeededSource::seeded(3);
        let card = CardGenerator::new(&bank)
            .generate_card("all-hands", &mut source, &mut CardRegistry::new())
            .unwrap();
        let mut words: Vec<&String> = card.words().iter().filter(|w| *w != FREE_SPACE).collect();
        words.sort();
        words.dedup();
        assert_eq!(words.len(), 24);
    }

    #[test]
    fn test_insufficient_words_fails_fast() {
        let words: Vec<String> = (0..23).map(|i| i.to_string()).collect();
        let err = layout("retro", &words, &mut SeededSource::seeded(0)).unwrap_err();
        assert!(matches!(
            err,
            BingoError::InsufficientWords { available: 23, required: 24, .. }
        ));
    }

    #[test]
    fn test_short_known_type_is_insufficient_words() {
        let bank = bank_with(10);
        let mut registry = CardRegistry::new();
        let err = CardGenerator::new(&bank)
            .generate_card("all-hands", &mut SeededSource::seeded(0), &mut registry)
            .unwrap_err();
        assert!(matches!(err, BingoError::InsufficientWords { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_batch_cards_have_distinct_ids() {
        let bank = bank_with(30);
        let mut registry = CardRegistry::new();
        let cards = CardGenerator::new(&bank)
            .generate_cards("all-hands", 4, &mut SeededSource::seeded(9), &mut registry)
            .unwrap();
        assert_eq!(cards.len(), 4);
        let ids: HashSet<u64> = cards.iter().map(Card::id).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_zero_cards_rejected() {
        let bank = bank_with(30);
        let err = CardGenerator::new(&bank)
            .generate_cards("all-hands", 0, &mut SeededSource::seeded(9), &mut CardRegistry::new())
            .unwrap_err();
        assert!(matches!(err, BingoError::InvalidRequest(_)));
    }

    #[test]
    fn test_toggle_and_reset() {
        let bank = bank_with(30);
        let mut card = CardGenerator::new(&bank)
            .generate_card("all-hands", &mut SeededSource::seeded(5), &mut CardRegistry::new())
            .unwrap();

        card.toggle(FREE_SPACE_INDEX).unwrap();
        assert!(card.is_marked(FREE_SPACE_INDEX));

        for i in [10, 11, 13, 14] {
            card.toggle(i).unwrap();
        }
        assert!(card.has_bingo());
        assert_eq!(card.bingo_lines(), &[[10, 11, 12, 13, 14]]);
        assert!(card.is_on_bingo_line(13));
        assert_eq!(card.squares_marked_count(), 5);
        assert_eq!(card.bingo_progress(), 20);

        card.toggle(11).unwrap();
        assert!(!card.has_bingo());

        assert!(matches!(
            card.toggle(25),
            Err(BingoError::InvalidIndex { index: 25, len: 25 })
        ));

        card.reset();
        assert_eq!(card.squares_marked_count(), 1);
        assert_eq!(card.bingo_progress(), 4);
        assert!(card.bingo_lines().is_empty());
    }

    #[test]
    fn test_card_serializes_to_wire_shape() {
        let bank = bank_with(30);
        let card = CardGenerator::new(&bank)
            .generate_card("all-hands", &mut SeededSource::seeded(5), &mut CardRegistry::new())
            .unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["meetingType"], "all-hands");
        assert_eq!(json["words"].as_array().unwrap().len(), 25);
        assert_eq!(json["markedSquares"][12], true);
        assert_eq!(json["hasBingo"], false);
        assert!(json["bingoLines"].as_array().unwrap().is_empty());
    }
}
