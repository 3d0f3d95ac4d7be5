#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use guess_core::{
    GameConfig, GameHistoryStore, SecretWord, SessionLifecycle, StoredGuess, StoredSession,
    WordSource,
};
use guess_types::{GameOutcome, SessionId, UserId};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// History store kept in memory so lifecycle tests can inspect every write
#[derive(Clone, Default)]
pub struct MemoryHistoryStore {
    inner: Arc<Mutex<Vec<StoredSession>>>,
    words: Arc<Mutex<Vec<SecretWord>>>,
}

impl MemoryHistoryStore {
    pub fn new(words: &[SecretWord]) -> Self {
        Self {
            inner: Arc::default(),
            words: Arc::new(Mutex::new(words.to_vec())),
        }
    }

    pub fn sessions(&self) -> Vec<StoredSession> {
        self.inner.lock().unwrap().clone()
    }

    pub fn session(&self, id: SessionId) -> Option<StoredSession> {
        self.sessions().into_iter().find(|s| s.id == id)
    }

    /// Insert a finished game directly, as if played earlier
    pub fn seed_session(&self, user_id: UserId, date: NaiveDate, outcome: GameOutcome) {
        let word = self.words.lock().unwrap()[0].clone();
        self.inner.lock().unwrap().push(StoredSession {
            id: Uuid::new_v4(),
            owner_id: user_id,
            secret_word: word,
            played_date: date,
            word_length: 5,
            max_guesses: 5,
            outcome,
            guesses: Vec::new(),
        });
    }
}

#[async_trait]
impl GameHistoryStore for MemoryHistoryStore {
    async fn create_session(
        &self,
        user_id: UserId,
        secret_word_id: i32,
        played_date: NaiveDate,
        rules: &GameConfig,
    ) -> anyhow::Result<SessionId> {
        let word = self
            .words
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == secret_word_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown secret word {}", secret_word_id))?;

        let id = Uuid::new_v4();
        self.inner.lock().unwrap().push(StoredSession {
            id,
            owner_id: user_id,
            secret_word: word,
            played_date,
            word_length: rules.word_length,
            max_guesses: rules.max_guesses,
            outcome: GameOutcome::InProgress,
            guesses: Vec::new(),
        });
        Ok(id)
    }

    async fn append_guess(
        &self,
        session_id: SessionId,
        guess_number: u32,
        guessed_word: &str,
    ) -> anyhow::Result<()> {
        let mut sessions = self.inner.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| anyhow::anyhow!("Session not found"))?;
        session.guesses.push(StoredGuess {
            guess_number,
            guessed_word: guessed_word.to_string(),
        });
        Ok(())
    }

    async fn finalize_session(&self, session_id: SessionId, won: bool) -> anyhow::Result<()> {
        let mut sessions = self.inner.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| anyhow::anyhow!("Session not found"))?;
        session.outcome = if won { GameOutcome::Won } else { GameOutcome::Lost };
        Ok(())
    }

    async fn count_sessions(&self, user_id: UserId, date: NaiveDate) -> anyhow::Result<u32> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.owner_id == user_id && s.played_date == date)
            .count() as u32)
    }

    async fn load_session(&self, session_id: SessionId) -> anyhow::Result<Option<StoredSession>> {
        Ok(self.session(session_id))
    }
}

/// Word source that always hands out the same word, or nothing
pub struct FixedWord(pub Option<SecretWord>);

#[async_trait]
impl WordSource for FixedWord {
    async fn random_word(&self) -> anyhow::Result<Option<SecretWord>> {
        Ok(self.0.clone())
    }
}

pub fn apple() -> SecretWord {
    SecretWord::new(1, "APPLE")
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

pub fn yesterday() -> NaiveDate {
    today().pred_opt().unwrap()
}

/// Lifecycle over a memory store, always picking APPLE
pub fn create_test_lifecycle(
    config: GameConfig,
) -> (SessionLifecycle<MemoryHistoryStore, FixedWord>, MemoryHistoryStore) {
    let store = MemoryHistoryStore::new(&[apple()]);
    let lifecycle = SessionLifecycle::new(store.clone(), FixedWord(Some(apple())), config);
    (lifecycle, store)
}
