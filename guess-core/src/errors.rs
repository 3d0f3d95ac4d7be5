use guess_types::{GameOutcome, SessionId};
use thiserror::Error;

/// Bad player input. Never changes session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter exactly {expected} letters (got {actual})")]
    WrongLength { expected: usize, actual: usize },
    #[error("Guess must contain only letters: {word}")]
    NonAlphabetic { word: String },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Game {session_id} is already over ({outcome:?})")]
    IllegalStateTransition {
        session_id: SessionId,
        outcome: GameOutcome,
    },

    #[error("Daily limit reached: {played} of {limit} games played today")]
    LimitExceeded { played: u32, limit: u32 },

    #[error("No secret words available")]
    NoWordsAvailable,

    #[error("Game not found: {session_id}")]
    SessionNotFound { session_id: SessionId },

    #[error("Corrupt game record {session_id}: {reason}")]
    CorruptSession {
        session_id: SessionId,
        reason: String,
    },

    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
