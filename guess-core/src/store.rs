use async_trait::async_trait;
use chrono::NaiveDate;
use guess_types::{SessionId, UserId};

use crate::{GameConfig, StoredSession};

/// Durable record of sessions and guesses. Every write must be durable when
/// the future resolves.
#[async_trait]
pub trait GameHistoryStore: Send + Sync {
    /// Record a new in-progress session. The word length and guess limit of
    /// `rules` are stored with it and handed back by `load_session`.
    async fn create_session(
        &self,
        user_id: UserId,
        secret_word_id: i32,
        played_date: NaiveDate,
        rules: &GameConfig,
    ) -> anyhow::Result<SessionId>;

    async fn append_guess(
        &self,
        session_id: SessionId,
        guess_number: u32,
        guessed_word: &str,
    ) -> anyhow::Result<()>;

    async fn finalize_session(&self, session_id: SessionId, won: bool) -> anyhow::Result<()>;

    /// Number of sessions the user created on `date`
    async fn count_sessions(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<u32>;

    async fn load_session(&self, session_id: SessionId) -> anyhow::Result<Option<StoredSession>>;
}
