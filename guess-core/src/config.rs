use serde::{Deserialize, Serialize};

pub const DEFAULT_WORD_LENGTH: usize = 5;
pub const DEFAULT_MAX_GUESSES: usize = 5;
pub const DEFAULT_DAILY_LIMIT: u32 = 3;

/// Rules of the game. Passed explicitly into every component that needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub word_length: usize,
    pub max_guesses: usize,
    pub daily_limit: u32,
}

impl GameConfig {
    pub fn new(word_length: usize, max_guesses: usize, daily_limit: u32) -> Self {
        Self {
            word_length,
            max_guesses,
            daily_limit,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LENGTH, DEFAULT_MAX_GUESSES, DEFAULT_DAILY_LIMIT)
    }
}
