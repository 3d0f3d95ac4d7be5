use chrono::NaiveDate;
use guess_types::{DailyUsage, GameOutcome, SessionId, UserId};
use tracing::{info, warn};

use crate::{
    DailyLimitGuard, GameConfig, GameError, GameHistoryStore, GameResult, GameSession,
    GuessOutcome, WordSource, pick_secret_word,
};

/// Drives sessions from creation to a final outcome, persisting every step
/// through the history store.
pub struct SessionLifecycle<S, W> {
    store: S,
    words: W,
    config: GameConfig,
}

impl<S, W> SessionLifecycle<S, W>
where
    S: GameHistoryStore,
    W: WordSource,
{
    pub fn new(store: S, words: W, config: GameConfig) -> Self {
        Self {
            store,
            words,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a new game for `user_id` on `today`.
    ///
    /// Nothing is persisted when the daily limit is reached or no word is
    /// available. Callers that serve concurrent requests must serialize this
    /// per user, since the count and the insert are separate statements.
    pub async fn start_session(&self, user_id: UserId, today: NaiveDate) -> GameResult<GameSession> {
        let played = self.store.count_sessions(user_id, today).await?;
        if !DailyLimitGuard::can_start_new_session(played, self.config.daily_limit) {
            info!(%user_id, played, limit = self.config.daily_limit, "Daily limit reached");
            return Err(GameError::LimitExceeded {
                played,
                limit: self.config.daily_limit,
            });
        }

        let secret_word = match pick_secret_word(&self.words).await {
            Ok(word) => word,
            Err(GameError::NoWordsAvailable) => {
                warn!(%user_id, "Could not start game, no secret words available");
                return Err(GameError::NoWordsAvailable);
            }
            Err(e) => return Err(e),
        };

        let session_id = self
            .store
            .create_session(user_id, secret_word.id, today, &self.config)
            .await?;

        info!(%user_id, %session_id, game_number = played + 1, "Started new game");

        Ok(GameSession::new(
            session_id,
            user_id,
            secret_word,
            today,
            self.config,
        ))
    }

    /// Apply a guess and persist it. A game that ends with this guess is
    /// finalized before returning.
    pub async fn submit_guess(&self, session: &mut GameSession, raw: &str) -> GameResult<GuessOutcome> {
        let result = session.submit_guess(raw)?;

        self.store
            .append_guess(session.id(), result.record.guess_number, &result.record.word)
            .await?;

        if result.outcome.is_terminal() {
            self.finalize(session).await?;
        }

        Ok(result)
    }

    /// Reload a session by id, under the rules it was created with. A session
    /// whose last guess ended the game but was never finalized is finalized
    /// here.
    pub async fn load_session(&self, session_id: SessionId) -> GameResult<GameSession> {
        let stored = self
            .store
            .load_session(session_id)
            .await?
            .ok_or(GameError::SessionNotFound { session_id })?;

        let stored_outcome = stored.outcome;
        let session = GameSession::restore(stored, self.config)?;

        if stored_outcome == GameOutcome::InProgress && session.is_terminal() {
            warn!(%session_id, outcome = ?session.outcome(), "Finalizing session left open");
            self.finalize(&session).await?;
        }

        Ok(session)
    }

    pub async fn usage(&self, user_id: UserId, today: NaiveDate) -> GameResult<DailyUsage> {
        let played = self.store.count_sessions(user_id, today).await?;
        Ok(DailyUsage {
            date: today.format("%Y-%m-%d").to_string(),
            played,
            limit: self.config.daily_limit,
            remaining: DailyLimitGuard::remaining(played, self.config.daily_limit),
        })
    }

    async fn finalize(&self, session: &GameSession) -> GameResult<()> {
        let won = session.outcome() == GameOutcome::Won;
        self.store.finalize_session(session.id(), won).await?;

        info!(
            session_id = %session.id(),
            user_id = %session.owner_id(),
            won,
            guesses = session.guess_log().len(),
            "Game finished"
        );
        Ok(())
    }
}
