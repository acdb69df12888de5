//! Highscore persistence (JSON file in the user's home directory).

use crate::highscores::types::HighscoreEntry;
use chrono::Utc;
use std::fs;
use std::io;
use std::path::PathBuf;

/// On-disk highscore store: one JSON file holding every recorded run.
pub struct HighscoreStore {
    path: PathBuf,
}

impl HighscoreStore {
    /// Store at the default location, `~/.serpent/highscores.json`.
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine home directory")
        })?;
        Ok(Self {
            path: home_dir.join(".serpent").join("highscores.json"),
        })
    }

    /// Store backed by an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all recorded entries. A missing or unreadable file and malformed
    /// JSON all read as an empty list, never an error.
    pub fn load(&self) -> Vec<HighscoreEntry> {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Write the full entry list, creating the parent directory if needed.
    pub fn save(&self, entries: &[HighscoreEntry]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }

    /// Append one finished run, stamped with the current time, and persist
    /// the whole list.
    pub fn record(&self, name: &str, score: u32, time_ms: u64) -> io::Result<()> {
        let mut entries = self.load();
        entries.push(HighscoreEntry::new(
            name,
            score,
            time_ms,
            Utc::now().timestamp(),
        ));
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_PLAYER_NAME;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Store under a unique temp directory so parallel tests never collide.
    fn test_store() -> HighscoreStore {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "serpent_test_{}_{}",
            std::process::id(),
            id
        ));
        HighscoreStore::with_path(dir.join("highscores.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store = test_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let store = test_store();
        fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        fs::write(&store.path, "{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = test_store();
        let entries = vec![
            HighscoreEntry::new("Ada", 42, 61_300, 1_700_000_000),
            HighscoreEntry::new("Bo", 7, 9_000, 1_700_000_100),
        ];
        store.save(&entries).unwrap();
        assert_eq!(store.load(), entries);
    }

    #[test]
    fn test_record_appends_to_existing_entries() {
        let store = test_store();
        store.record("Ada", 10, 30_000).unwrap();
        store.record("Bo", 20, 45_000).unwrap();

        let entries = store.load();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Ada");
        assert_eq!(entries[1].name, "Bo");
        assert_eq!(entries[1].score, 20);
        assert!(entries[1].date >= entries[0].date);
    }

    #[test]
    fn test_record_resolves_blank_names() {
        let store = test_store();
        store.record("   ", 3, 5_000).unwrap();
        assert_eq!(store.load()[0].name, DEFAULT_PLAYER_NAME);
    }
}
