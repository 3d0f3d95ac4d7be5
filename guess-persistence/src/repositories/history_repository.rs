use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{game_history, guess_details, prelude::*};
use guess_core::{GameConfig, GameHistoryStore, SecretWord, StoredGuess, StoredSession};
use guess_types::{GameOutcome, SessionId, UserId};

pub struct HistoryRepository {
    db: DatabaseConnection,
}

impl HistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Most recent unfinished session of a user, if any
    pub async fn find_open_session(&self, user_id: UserId) -> Result<Option<SessionId>> {
        let model = GameHistory::find()
            .filter(game_history::Column::UserId.eq(user_id))
            .filter(game_history::Column::Outcome.eq(GameOutcome::InProgress.as_str()))
            .order_by_desc(game_history::Column::CreatedAt)
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.id))
    }
}

#[async_trait]
impl GameHistoryStore for HistoryRepository {
    async fn create_session(
        &self,
        user_id: UserId,
        secret_word_id: i32,
        played_date: NaiveDate,
        rules: &GameConfig,
    ) -> Result<SessionId> {
        let id = Uuid::new_v4();
        let model = game_history::ActiveModel {
            id: ActiveValue::Set(id),
            user_id: ActiveValue::Set(user_id),
            secret_word_id: ActiveValue::Set(secret_word_id),
            word_length: ActiveValue::Set(rules.word_length as i32),
            max_guesses: ActiveValue::Set(rules.max_guesses as i32),
            outcome: ActiveValue::Set(GameOutcome::InProgress.as_str().to_string()),
            is_won: ActiveValue::Set(false),
            date_played: ActiveValue::Set(played_date),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        GameHistory::insert(model)
            .exec(&self.db)
            .await
            .context("Failed to create game history entry")?;

        debug!(session_id = %id, %user_id, %played_date, "Created game history entry");
        Ok(id)
    }

    async fn append_guess(
        &self,
        session_id: SessionId,
        guess_number: u32,
        guessed_word: &str,
    ) -> Result<()> {
        let model = guess_details::ActiveModel {
            id: ActiveValue::NotSet,
            history_id: ActiveValue::Set(session_id),
            guess_number: ActiveValue::Set(guess_number as i32),
            guessed_word: ActiveValue::Set(guessed_word.to_string()),
        };

        GuessDetails::insert(model)
            .exec(&self.db)
            .await
            .with_context(|| format!("Failed to save guess {} of {}", guess_number, session_id))?;
        Ok(())
    }

    async fn finalize_session(&self, session_id: SessionId, won: bool) -> Result<()> {
        let outcome = if won { GameOutcome::Won } else { GameOutcome::Lost };

        let result = GameHistory::update_many()
            .col_expr(game_history::Column::Outcome, Expr::value(outcome.as_str()))
            .col_expr(game_history::Column::IsWon, Expr::value(won))
            .filter(game_history::Column::Id.eq(session_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(anyhow::anyhow!("Game history entry not found: {}", session_id));
        }
        Ok(())
    }

    async fn count_sessions(&self, user_id: UserId, date: NaiveDate) -> Result<u32> {
        let count = GameHistory::find()
            .filter(game_history::Column::UserId.eq(user_id))
            .filter(game_history::Column::DatePlayed.eq(date))
            .count(&self.db)
            .await?;

        Ok(count as u32)
    }

    async fn load_session(&self, session_id: SessionId) -> Result<Option<StoredSession>> {
        let Some(history) = GameHistory::find_by_id(session_id).one(&self.db).await? else {
            return Ok(None);
        };

        let word = SecretWords::find_by_id(history.secret_word_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Secret word {} missing", history.secret_word_id))?;

        let guesses = GuessDetails::find()
            .filter(guess_details::Column::HistoryId.eq(session_id))
            .order_by_asc(guess_details::Column::GuessNumber)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|g| StoredGuess {
                guess_number: g.guess_number as u32,
                guessed_word: g.guessed_word,
            })
            .collect();

        let outcome = GameOutcome::parse(&history.outcome)
            .ok_or_else(|| anyhow::anyhow!("Unknown outcome '{}'", history.outcome))?;

        Ok(Some(StoredSession {
            id: history.id,
            owner_id: history.user_id,
            secret_word: SecretWord::new(word.id, word.word),
            played_date: history.date_played,
            word_length: usize::try_from(history.word_length).unwrap_or(0),
            max_guesses: usize::try_from(history.max_guesses).unwrap_or(0),
            outcome,
            guesses,
        }))
    }
}
