use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::card::WORDS_PER_CARD;
use crate::error::{BingoError, Result};

const BUILTIN_BANK: &str = include_str!("../data/buzzwords.json");

#[derive(Debug, Clone, Deserialize)]
pub struct MeetingType {
    pub name: String,
    pub display_name: String,
    pub words: Vec<String>,
}

/// Catalogue entry for listing meeting types to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTypeInfo {
    pub id: usize,
    pub name: String,
    pub display_name: String,
}

// The JSON file has the following structure:
// {
//    "default": "all-hands",
//    "meeting_types": [ { "name": "...", "display_name": "...", "words": ["..."] }, ... ]
// }
#[derive(Debug, Deserialize)]
struct WordBankFile {
    default: Option<String>,
    meeting_types: Vec<MeetingType>,
}

/// Meeting type key to candidate buzzwords, plus the designated fallback type.
#[derive(Debug, Clone)]
pub struct WordBank {
    types: Vec<MeetingType>,
    default_type: String,
}

/// A resolved word list and the key it actually belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub meeting_type: &'a str,
    pub words: &'a [String],
    pub fell_back: bool,
}

impl WordBank {
    /// Builds a bank, dropping repeated words within each type.
    ///
    /// `default_type` must name one of `types`.
    pub fn new(types: Vec<MeetingType>, default_type: impl Into<String>) -> Result<Self> {
        let default_type = default_type.into();
        let types: Vec<MeetingType> = types.into_iter().map(dedup_words).collect();
        if !types.iter().any(|t| t.name == default_type) {
            return Err(BingoError::Configuration(format!(
                "default meeting type {default_type} is not in the word bank"
            )));
        }
        Ok(Self { types, default_type })
    }

    /// The bank embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_BANK)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: WordBankFile = serde_json::from_str(json)?;
        Self::from_file_contents(file)
    }

    pub fn read_from_json(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let contents: WordBankFile = serde_json::from_reader(reader)?;
        debug!("loaded word bank from {}", path.display());
        Self::from_file_contents(contents)
    }

    fn from_file_contents(file: WordBankFile) -> Result<Self> {
        let default = match file.default {
            Some(d) => d,
            None => file
                .meeting_types
                .first()
                .map(|t| t.name.clone())
                .ok_or_else(|| BingoError::Configuration("word bank has no meeting types".into()))?,
        };
        Self::new(file.meeting_types, default)
    }

    /// Replace the fallback type.
    pub fn with_default(mut self, default_type: &str) -> Result<Self> {
        if self.get(default_type).is_none() {
            return Err(BingoError::Configuration(format!(
                "default meeting type {default_type} is not in the word bank"
            )));
        }
        self.default_type = default_type.to_string();
        Ok(self)
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    fn get(&self, meeting_type: &str) -> Option<&MeetingType> {
        self.types.iter().find(|t| t.name == meeting_type)
    }

    pub fn contains(&self, meeting_type: &str) -> bool {
        self.get(meeting_type).is_some()
    }

    /// Lenient lookup: unknown keys resolve to the default type.
    pub fn words_for(&self, meeting_type: &str) -> Result<Resolved<'_>> {
        if let Some(t) = self.get(meeting_type) {
            return Ok(Resolved {
                meeting_type: &t.name,
                words: &t.words,
                fell_back: false,
            });
        }
        warn!(
            "unknown meeting type {meeting_type:?}, falling back to {:?}",
            self.default_type
        );
        let fallback = self.get(&self.default_type).ok_or_else(|| {
            BingoError::Configuration(format!(
                "fallback meeting type {} is missing",
                self.default_type
            ))
        })?;
        if fallback.words.len() < WORDS_PER_CARD {
            return Err(BingoError::Configuration(format!(
                "fallback meeting type {} has only {} buzzwords",
                fallback.name,
                fallback.words.len()
            )));
        }
        Ok(Resolved {
            meeting_type: &fallback.name,
            words: &fallback.words,
            fell_back: true,
        })
    }

    /// Strict lookup: unknown keys are an error.
    pub fn strict_words_for(&self, meeting_type: &str) -> Result<&[String]> {
        self.get(meeting_type)
            .map(|t| t.words.as_slice())
            .ok_or_else(|| BingoError::UnknownMeetingType {
                meeting_type: meeting_type.to_string(),
            })
    }

    pub fn display_name(&self, meeting_type: &str) -> Option<&str> {
        self.get(meeting_type).map(|t| t.display_name.as_str())
    }

    /// Meeting types in bank order, numbered from 1.
    pub fn meeting_types(&self) -> Vec<MeetingTypeInfo> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| MeetingTypeInfo {
                id: i + 1,
                name: t.name.clone(),
                display_name: t.display_name.clone(),
            })
            .collect()
    }

    /// Names of the types that cannot fill a card.
    pub fn validate(&self) -> Vec<&str> {
        let short: Vec<&str> = self
            .types
            .iter()
            .filter(|t| t.words.len() < WORDS_PER_CARD)
            .map(|t| t.name.as_str())
            .collect();
        for name in &short {
            warn!("meeting type {name} has fewer than {WORDS_PER_CARD} buzzwords");
        }
        short
    }
}

fn dedup_words(mut meeting_type: MeetingType) -> MeetingType {
    let mut seen = HashSet::new();
    let before = meeting_type.words.len();
    meeting_type.words.retain(|w| seen.insert(w.clone()));
    if meeting_type.words.len() != before {
        debug!(
            "dropped {} repeated buzzwords from {}",
            before - meeting_type.words.len(),
            meeting_type.name
        );
    }
    meeting_type
}
