use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Raw figures for one calendar date across all players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    pub date: String,
    pub unique_players: u64,
    pub games_won: u64,
    pub total_games: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserDailyHistory {
    pub date: String,
    pub words_tried: u64,
    pub correct_guesses: u64,
}
