mod error;
mod store;

pub use error::{LeaderboardError, StoreError};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

use serde::{Deserialize, Serialize};

pub const LEADERBOARD_KEY: &str = "leaderboard";
pub const MAX_ENTRIES: usize = 10;
pub const MAX_INITIALS_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub initials: String,
    pub wins: u32,
}

/// Top-ten win counts keyed by initials.
///
/// `record` is a read-modify-write over the store with no locking: two
/// processes sharing one store can still lose an update.
pub struct Leaderboard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Entries sorted by wins, best first. Missing or unreadable data reads
    /// as an empty leaderboard.
    pub fn read(&self) -> Vec<LeaderboardEntry> {
        match self.store.get(LEADERBOARD_KEY) {
            Ok(content) => decode_entries(content.as_deref()),
            Err(e) => {
                crate::log!("Failed to read leaderboard, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Adds one win for `initials`, creating the entry if needed. A store
    /// read failure aborts without writing.
    pub fn record(&self, initials: &str) -> Result<(), LeaderboardError> {
        let initials = normalize_initials(initials)
            .ok_or_else(|| LeaderboardError::InvalidInitials(initials.to_string()))?;

        let content = self.store.get(LEADERBOARD_KEY)?;
        let mut entries = decode_entries(content.as_deref());
        match entries.iter_mut().find(|entry| entry.initials == initials) {
            Some(entry) => entry.wins = entry.wins.saturating_add(1),
            None => entries.push(LeaderboardEntry {
                initials: initials.clone(),
                wins: 1,
            }),
        }
        sort_and_truncate(&mut entries);

        let encoded = serde_json::to_string(&entries)?;
        self.store.set(LEADERBOARD_KEY, &encoded)?;

        crate::log!("Recorded win for {}", initials);
        Ok(())
    }
}

// Missing or corrupt content decodes to an empty list.
fn decode_entries(content: Option<&str>) -> Vec<LeaderboardEntry> {
    let Some(content) = content else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<LeaderboardEntry>>(content) {
        Ok(mut entries) => {
            sort_and_truncate(&mut entries);
            entries
        }
        Err(e) => {
            crate::log!("Corrupt leaderboard data, treating as empty: {}", e);
            Vec::new()
        }
    }
}

/// Trims, uppercases and keeps the first three characters, the way the
/// end-of-game prompt accepts initials. Returns `None` when nothing is left.
pub fn normalize_initials(raw: &str) -> Option<String> {
    let initials: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .take(MAX_INITIALS_LEN)
        .collect();

    if initials.is_empty() {
        None
    } else {
        Some(initials)
    }
}

// Stable sort: among equal win counts the earlier entry stays ahead.
fn sort_and_truncate(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by(|a, b| b.wins.cmp(&a.wins));
    entries.truncate(MAX_ENTRIES);
}
