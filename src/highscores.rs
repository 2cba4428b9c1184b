//! Local best-runs table
//!
//! Persisted in the key/value store, tracks the top 10 finished runs.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub jumps: u32,
    /// Made it to the mountain
    pub reached_goal: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score table, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "penguin_rush_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the table
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run. Returns the rank achieved or None.
    pub fn add_score(
        &mut self,
        score: u64,
        jumps: u32,
        reached_goal: bool,
        timestamp: f64,
    ) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        let entry = HighScoreEntry {
            score,
            jumps,
            reached_goal,
            timestamp,
        };
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json::<HighScores>(store, Self::STORAGE_KEY) {
            Ok(Some(scores)) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {e}");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_sorted_insert_and_truncate() {
        let mut scores = HighScores::new();
        for (i, s) in [50u64, 200, 120].iter().enumerate() {
            scores.add_score(*s, i as u32, false, 0.0);
        }
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![200, 120, 50]);
        assert_eq!(scores.top_score(), Some(200));

        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(1000 + s, 0, true, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(1010));
        // Table full of 1001..=1010: a low score no longer qualifies
        assert_eq!(scores.add_score(60, 3, false, 0.0), None);
        assert_eq!(scores.potential_rank(1005), Some(7));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score(100, 1, false, 1.0);
        assert_eq!(scores.add_score(100, 2, false, 2.0), Some(2));
        assert_eq!(scores.entries[0].timestamp, 1.0);
    }

    #[test]
    fn test_persisted() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::new();
        scores.add_score(615, 14, true, 123.0);
        scores.save(&mut store);

        let loaded = HighScores::load(&store);
        assert_eq!(loaded.entries, scores.entries);
        assert!(HighScores::load(&MemoryStore::new()).is_empty());
    }
}
