use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};
use uuid::Uuid;

use guess_types::{DailyReport, UserDailyHistory};

#[derive(Debug, FromQueryResult)]
struct DailyCounts {
    unique_players: i64,
    games_won: i64,
    total_games: i64,
}

#[derive(Debug, FromQueryResult)]
struct HistoryRow {
    date_played: NaiveDate,
    words_tried: i64,
    correct_guesses: i64,
}

/// Raw aggregate queries over `game_history`. Formatting is left to callers.
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"SELECT
                COUNT(DISTINCT user_id) AS unique_players,
                COALESCE(SUM(CASE WHEN is_won THEN 1 ELSE 0 END), 0) AS games_won,
                COUNT(*) AS total_games
            FROM game_history
            WHERE date_played = ?"#,
            [date.into()],
        );

        let counts = DailyCounts::find_by_statement(statement)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Daily report query returned no row"))?;

        Ok(DailyReport {
            date: date.format("%Y-%m-%d").to_string(),
            unique_players: counts.unique_players as u64,
            games_won: counts.games_won as u64,
            total_games: counts.total_games as u64,
        })
    }

    /// Games started and won per day for one user, newest first
    pub async fn user_history(&self, user_id: Uuid) -> Result<Vec<UserDailyHistory>> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"SELECT
                date_played,
                COUNT(id) AS words_tried,
                COALESCE(SUM(CASE WHEN is_won THEN 1 ELSE 0 END), 0) AS correct_guesses
            FROM game_history
            WHERE user_id = ?
            GROUP BY date_played
            ORDER BY date_played DESC"#,
            [user_id.into()],
        );

        let rows = HistoryRow::find_by_statement(statement)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| UserDailyHistory {
                date: row.date_played.format("%Y-%m-%d").to_string(),
                words_tried: row.words_tried as u64,
                correct_guesses: row.correct_guesses as u64,
            })
            .collect();

        Ok(rows)
    }
}
