//! High score leaderboard
//!
//! Every submitted score is kept; only the display is capped at
//! [`MAX_DISPLAYED`] entries.

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistenceStore, StorageBackend, keys};

/// Maximum number of scores shown on the leaderboard
pub const MAX_DISPLAYED: usize = 50;

/// Maximum stored name length in characters
pub const MAX_NAME_LEN: usize = 16;

const ANONYMOUS: &str = "Anonymous";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when submitted
    pub timestamp: f64,
}

impl ScoreRecord {
    /// Build a record with a cleaned-up display name
    pub fn new(name: &str, score: u64, timestamp: f64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
            timestamp,
        }
    }
}

/// Trim, bound to [`MAX_NAME_LEN`] characters, default to "Anonymous"
pub fn sanitize_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        ANONYMOUS.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Leaderboard, sorted by score descending. Ties keep submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<ScoreRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list, restoring sort order if it was lost
    pub fn from_records(mut entries: Vec<ScoreRecord>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    pub fn load<B: StorageBackend>(store: &PersistenceStore<B>) -> Self {
        let scores = Self::from_records(store.get_score_list(keys::SCORES));
        log::info!("Loaded {} high scores", scores.len());
        scores
    }

    pub fn save<B: StorageBackend>(&self, store: &mut PersistenceStore<B>) {
        store.set_score_list(keys::SCORES, &self.entries);
        log::debug!("High scores saved ({} entries)", self.entries.len());
    }

    /// Whether a score would appear on the displayed board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_DISPLAYED {
            return true;
        }
        score > self.entries[MAX_DISPLAYED - 1].score
    }

    /// Rank a score would get (1-indexed), if it qualifies
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        Some(self.insertion_point(score) + 1)
    }

    /// Insert a record and return its rank (1-indexed)
    pub fn add(&mut self, record: ScoreRecord) -> usize {
        let pos = self.insertion_point(record.score);
        self.entries.insert(pos, record);
        pos + 1
    }

    /// Best `n` entries, never more than [`MAX_DISPLAYED`]
    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        let n = n.min(MAX_DISPLAYED).min(self.entries.len());
        &self.entries[..n]
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.entries
    }

    fn insertion_point(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
    }
}

/// Relative date for the leaderboard ("3 mins ago", "Yesterday", ...)
pub fn format_date(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        match diff_days.floor() as i64 {
            1 => "Yesterday".to_string(),
            days if days < 7 => format!("{} days ago", days),
            days if days < 14 => "Last week".to_string(),
            days => format!("{} weeks ago", days / 7),
        }
    } else if diff_hours >= 1.0 {
        match diff_hours.floor() as i64 {
            1 => "1 hour ago".to_string(),
            hours => format!("{} hours ago", hours),
        }
    } else if diff_mins >= 1.0 {
        match diff_mins.floor() as i64 {
            1 => "1 min ago".to_string(),
            mins => format!("{} mins ago", mins),
        }
    } else {
        "Just now".to_string()
    }
}
