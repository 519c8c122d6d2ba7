//! High score leaderboard and initials editor
//!
//! The leaderboard keeps the top 10 `{initials, score}` entries, sorted
//! descending by score, and persists them through the injected key-value
//! store as a bare JSON array. A missing or corrupt record falls back to
//! ten placeholder entries so the table is always full on screen.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Maximum number of leaderboard entries
pub const MAX_HIGH_SCORES: usize = 10;

/// Storage key for the serialized leaderboard
pub const STORAGE_KEY: &str = "blockbreak_highscores";

/// Initials shown for a placeholder entry
const PLACEHOLDER_INITIALS: &str = "---";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Three characters of player initials
    pub initials: String,
    pub score: u64,
}

/// The top-10 leaderboard
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Leaderboard of ten zero-score placeholder entries
    pub fn placeholder() -> Self {
        Self {
            entries: (0..MAX_HIGH_SCORES)
                .map(|_| HighScoreEntry {
                    initials: PLACEHOLDER_INITIALS.to_owned(),
                    score: 0,
                })
                .collect(),
        }
    }

    /// Load the leaderboard from the store, falling back to placeholders
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(STORAGE_KEY) {
            match serde_json::from_str::<Vec<HighScoreEntry>>(&json) {
                Ok(entries) => {
                    log::info!("loaded {} high score entries", entries.len());
                    return Self { entries };
                }
                Err(err) => log::warn!("discarding corrupt high score record: {err}"),
            }
        }
        log::info!("no stored high scores, starting with placeholders");
        Self::placeholder()
    }

    /// Persist the leaderboard. Storage failures are the store's problem.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => store.set(STORAGE_KEY, &json),
            Err(err) => log::warn!("could not serialize high scores: {err}"),
        }
    }

    /// Whether a score earns a spot on the board
    ///
    /// A short table accepts anything; a full one requires strictly beating
    /// the last entry, so a tie with tenth place does not qualify.
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Insert an entry, keep the table sorted and capped, and persist it.
    /// Returns the 1-indexed rank achieved.
    pub fn record(&mut self, store: &mut dyn KeyValueStore, initials: &str, score: u64) -> usize {
        self.entries.push(HighScoreEntry {
            initials: initials.to_owned(),
            score,
        });
        // Stable sort: on equal scores the older entry keeps the higher rank
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);

        self.save(store);
        log::info!("recorded high score {score} for {initials}");

        self.entries
            .iter()
            .position(|e| e.initials == initials && e.score == score)
            .map_or(self.entries.len(), |i| i + 1)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }
}

/// Number of initials characters on a leaderboard entry
pub const INITIALS_LEN: usize = 3;

/// Three-slot initials editor used on the new-high-score screen
///
/// Each slot cycles through `-`, `A`..`Z` with wraparound in both
/// directions; direct input accepts letters only and advances the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialsEntry {
    chars: [char; INITIALS_LEN],
    cursor: usize,
}

impl Default for InitialsEntry {
    fn default() -> Self {
        Self {
            chars: ['-'; INITIALS_LEN],
            cursor: 0,
        }
    }
}

impl InitialsEntry {
    /// Cycle the character under the cursor forward: `-`, `A`, ..., `Z`, `-`
    pub fn cycle_up(&mut self) {
        let slot = &mut self.chars[self.cursor];
        *slot = match *slot {
            '-' => 'A',
            'Z' => '-',
            c => (c as u8 + 1) as char,
        };
    }

    /// Cycle the character under the cursor backward
    pub fn cycle_down(&mut self) {
        let slot = &mut self.chars[self.cursor];
        *slot = match *slot {
            '-' => 'Z',
            'A' => '-',
            c => (c as u8 - 1) as char,
        };
    }

    /// Set the character under the cursor directly and advance
    ///
    /// Anything but a letter is ignored with no state change.
    pub fn set_char(&mut self, c: char) {
        if !c.is_ascii_alphabetic() {
            return;
        }
        self.chars[self.cursor] = c.to_ascii_uppercase();
        if self.cursor < INITIALS_LEN - 1 {
            self.cursor += 1;
        }
    }

    /// Clear the character under the cursor and retreat
    pub fn backspace(&mut self) {
        self.chars[self.cursor] = '-';
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < INITIALS_LEN - 1 {
            self.cursor += 1;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn chars(&self) -> &[char; INITIALS_LEN] {
        &self.chars
    }

    /// The initials as submitted to the leaderboard
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}
