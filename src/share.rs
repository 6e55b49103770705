use crate::card::{Card, FREE_SPACE_INDEX};

const HASHTAG: &str = "#CorporateBuzzwordBingo";

/// Marked words in grid order, without the free space.
pub fn marked_words(card: &Card) -> Vec<&str> {
    card.words()
        .iter()
        .zip(card.marked_squares())
        .enumerate()
        .filter(|&(i, (_, &marked))| marked && i != FREE_SPACE_INDEX)
        .map(|(_, (word, _))| word.as_str())
        .collect()
}

/// Social post text for a card, quoting up to two marked words.
pub fn share_text(meeting_name: &str, has_bingo: bool, marked: &[&str]) -> String {
    if has_bingo {
        let highlights = match marked {
            [a, b, ..] => format!(" The buzzword bingo card was filled with classics like \"{a}\" and \"{b}\"."),
            [a] => format!(" The buzzword bingo card was filled with classics like \"{a}\"."),
            [] => String::new(),
        };
        format!("BINGO! I just won at Corporate Buzzword Bingo during a {meeting_name}!{highlights} {HASHTAG}")
    } else {
        let heard = match marked {
            [a, b, ..] => format!(" So far I've heard \"{a}\" and \"{b}\" multiple times!"),
            [a] => format!(" So far I've heard \"{a}\" multiple times!"),
            [] => " Waiting for the first buzzword...".to_string(),
        };
        format!("Playing Corporate Buzzword Bingo during my {meeting_name}.{heard} {HASHTAG}")
    }
}

/// Share text for a card, using the bank's display name when known.
pub fn share_text_for(card: &Card, display_name: Option<&str>) -> String {
    let name = display_name.unwrap_or(card.meeting_type());
    share_text(name, card.has_bingo(), &marked_words(card))
}
