//! Highscore entries and ranking.

use crate::core::constants::{DEFAULT_PLAYER_NAME, HIGHSCORE_DISPLAY_COUNT};
use serde::{Deserialize, Serialize};

/// One finished run: who, how many points, how long they survived, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub name: String,
    pub score: u32,
    pub time_ms: u64,
    /// Unix timestamp (seconds) of when the run was recorded.
    pub date: i64,
}

impl HighscoreEntry {
    /// Build an entry. A blank name falls back to the default placeholder.
    pub fn new(name: &str, score: u32, time_ms: u64, date: i64) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            name,
            score,
            time_ms,
            date,
        }
    }
}

/// Rank entries best-first: score descending, then survival time ascending,
/// then date ascending. The shorter and earlier run wins ties.
pub fn sort_entries(entries: &mut [HighscoreEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.time_ms.cmp(&b.time_ms))
            .then(a.date.cmp(&b.date))
    });
}

/// The display slice of an already sorted list.
pub fn top_entries(entries: &[HighscoreEntry]) -> &[HighscoreEntry] {
    &entries[..entries.len().min(HIGHSCORE_DISPLAY_COUNT)]
}
