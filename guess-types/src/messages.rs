use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameOutcome, GuessEntry, SessionView};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateUserRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitGuessRequest {
    pub guess: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessResponse {
    pub entry: GuessEntry,
    pub outcome: GameOutcome,
    pub session: SessionView,
    pub message: Option<String>,
}
