use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{SessionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LetterStatus {
    Exact,   // Green - right letter, right position
    Present, // Yellow - right letter, wrong position
    Absent,  // Grey - no unmatched instance left in the word
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LetterResult {
    pub letter: String,
    pub status: LetterStatus,
    pub position: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameOutcome {
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Storage representation used by the `game_history.outcome` column
    pub fn as_str(self) -> &'static str {
        match self {
            GameOutcome::InProgress => "in_progress",
            GameOutcome::Won => "won",
            GameOutcome::Lost => "lost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_progress" => Some(GameOutcome::InProgress),
            "won" => Some(GameOutcome::Won),
            "lost" => Some(GameOutcome::Lost),
            _ => None,
        }
    }
}

/// One row of the board as shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessEntry {
    pub guess_number: i32,
    pub word: String,
    pub letters: Vec<LetterResult>,
}

/// Client-safe snapshot of a session. The secret word is only filled in
/// once the game is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionView {
    pub id: SessionId,
    pub owner_id: UserId,
    pub word_length: i32,
    pub max_guesses: i32,
    pub remaining_guesses: i32,
    pub outcome: GameOutcome,
    pub guesses: Vec<GuessEntry>,
    pub played_date: String, // YYYY-MM-DD
    pub revealed_word: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyUsage {
    pub date: String,
    pub played: u32,
    pub limit: u32,
    pub remaining: u32,
}
