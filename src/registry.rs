use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::card::TOTAL_CELLS;

/// A generated card layout as it was handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: u64,
    pub meeting_type: String,
    pub words: Vec<String>,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

/// In-memory registry of generated cards. Ids start at 1 and only grow.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    records: BTreeMap<u64, CardRecord>,
    next_id: u64,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Stores a layout and returns its id.
    pub fn register(&mut self, meeting_type: &str, words: &[String; TOTAL_CELLS]) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.records.insert(
            id,
            CardRecord {
                id,
                meeting_type: meeting_type.to_string(),
                words: words.to_vec(),
                created_at,
            },
        );
        id
    }

    /// Drops the records of discarded cards. Ids are not reused.
    pub fn forget(&mut self, ids: impl IntoIterator<Item = u64>) {
        for id in ids {
            self.records.remove(&id);
        }
    }

    pub fn get(&self, id: u64) -> Option<&CardRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::new()
    }
}
