//! In-session scoreboard
//!
//! Tracks the best finished runs since the page loaded. Nothing is persisted.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_ENTRIES: usize = 5;

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Misses taken during the run
    pub misses: u32,
}

/// Best runs, sorted by score descending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished run. Returns the rank achieved (1-indexed) or None.
    pub fn add_score(&mut self, score: u32, misses: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry { score, misses };
        // Ties rank below earlier runs
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut board = Scoreboard::new();
        assert_eq!(board.add_score(0, 3), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_sorted_and_ranked() {
        let mut board = Scoreboard::new();
        assert_eq!(board.add_score(5, 3), Some(1));
        assert_eq!(board.add_score(9, 3), Some(1));
        assert_eq!(board.add_score(5, 3), Some(3));
        assert_eq!(board.top_score(), Some(9));
        let scores: Vec<_> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5, 5]);
    }

    #[test]
    fn test_truncates_to_max() {
        let mut board = Scoreboard::new();
        for score in 1..=(MAX_ENTRIES as u32 + 3) {
            board.add_score(score, 3);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert!(!board.qualifies(1));
        assert!(board.qualifies(100));
        assert_eq!(board.entries.last().map(|e| e.score), Some(4));
    }
}
