use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::league::Picks;

/// One submission. Never edited after creation; a player resubmits instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    pub id: Uuid,
    pub display_name: String,
    #[serde(flatten)]
    pub picks: Picks,
    pub submitted_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(display_name: impl Into<String>, picks: Picks) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into().trim().to_string(),
            picks,
            submitted_at: Utc::now(),
        }
    }

    /// Identity used for supersession: trimmed, case-insensitive name
    pub fn owner_key(&self) -> String {
        self.display_name.trim().to_lowercase()
    }
}

/// Append-only log of every entry ever submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLog {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Default for EntryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryLog {
    /// Create a new empty log with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            entries: Vec::new(),
        }
    }

    /// Record a submission, returning a reference to the stored entry
    pub fn submit(&mut self, entry: Entry) -> &Entry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Latest entry per player, in the order those entries were submitted.
    ///
    /// A later submission from the same player replaces the earlier one;
    /// when timestamps tie the one appended last wins.
    pub fn current(&self) -> Vec<&Entry> {
        let mut latest: HashMap<String, usize> = HashMap::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let key = entry.owner_key();
            match latest.get(&key) {
                Some(&j) if self.entries[j].submitted_at > entry.submitted_at => {}
                _ => {
                    latest.insert(key, i);
                }
            }
        }

        let mut indexes: Vec<usize> = latest.into_values().collect();
        indexes.sort_unstable();
        indexes.into_iter().map(|i| &self.entries[i]).collect()
    }

    /// Every submission a player has made, oldest first
    pub fn history_for(&self, display_name: &str) -> Vec<&Entry> {
        let key = display_name.trim().to_lowercase();
        self.entries.iter().filter(|e| e.owner_key() == key).collect()
    }
}
