use chrono::NaiveDate;
use guess_types::{GameOutcome, GuessEntry, LetterStatus, SessionId, SessionView, UserId};
use tracing::debug;

use crate::validation::normalize_guess;
use crate::{FeedbackEvaluator, GameConfig, GameError, GameResult, SecretWord};

/// One attempt in a session's guess log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub guess_number: u32,
    pub word: String,
    pub feedback: Vec<LetterStatus>,
}

impl GuessRecord {
    pub fn to_entry(&self) -> GuessEntry {
        GuessEntry {
            guess_number: self.guess_number as i32,
            word: self.word.clone(),
            letters: FeedbackEvaluator::to_letters(&self.word, &self.feedback),
        }
    }
}

/// Result of an accepted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub record: GuessRecord,
    pub outcome: GameOutcome,
}

/// A guess as it comes back from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGuess {
    pub guess_number: u32,
    pub guessed_word: String,
}

/// Everything the history store keeps about a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub id: SessionId,
    pub owner_id: UserId,
    pub secret_word: SecretWord,
    pub played_date: NaiveDate,
    // Rules the session was created under
    pub word_length: usize,
    pub max_guesses: usize,
    pub outcome: GameOutcome,
    pub guesses: Vec<StoredGuess>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    owner_id: UserId,
    secret_word: SecretWord, // Hidden from clients until the game is over
    guess_log: Vec<GuessRecord>,
    config: GameConfig,
    outcome: GameOutcome,
    played_date: NaiveDate,
}

impl GameSession {
    pub fn new(
        id: SessionId,
        owner_id: UserId,
        secret_word: SecretWord,
        played_date: NaiveDate,
        config: GameConfig,
    ) -> Self {
        Self {
            id,
            owner_id,
            secret_word,
            guess_log: Vec::with_capacity(config.max_guesses),
            config,
            outcome: GameOutcome::InProgress,
            played_date,
        }
    }

    /// Rebuild a session from its persisted form by replaying every stored
    /// guess through the evaluator.
    ///
    /// Word length and guess limit come from the stored record, so a session
    /// keeps the rules it started with; only the daily limit is taken from
    /// `config`.
    ///
    /// A stored `InProgress` outcome is superseded by the replayed one, which
    /// covers a guess that was saved without the session being finalized.
    /// A stored terminal outcome must agree with the replay.
    pub fn restore(stored: StoredSession, config: GameConfig) -> GameResult<Self> {
        let StoredSession {
            id,
            owner_id,
            secret_word,
            played_date,
            word_length,
            max_guesses,
            outcome: stored_outcome,
            mut guesses,
        } = stored;

        let corrupt = |reason: String| GameError::CorruptSession {
            session_id: id,
            reason,
        };

        if word_length == 0 || max_guesses == 0 {
            return Err(corrupt(format!(
                "stored rules {} letters / {} guesses are not playable",
                word_length, max_guesses
            )));
        }
        let config = GameConfig::new(word_length, max_guesses, config.daily_limit);

        if guesses.len() > config.max_guesses {
            return Err(corrupt(format!(
                "{} guesses recorded, at most {} allowed",
                guesses.len(),
                config.max_guesses
            )));
        }

        guesses.sort_by_key(|g| g.guess_number);

        let mut session = Self::new(id, owner_id, secret_word, played_date, config);
        for (index, guess) in guesses.into_iter().enumerate() {
            let expected = index as u32 + 1;
            if guess.guess_number != expected {
                return Err(corrupt(format!(
                    "guess number {} found where {} was expected",
                    guess.guess_number, expected
                )));
            }
            if session.is_terminal() {
                return Err(corrupt(format!(
                    "guess {} recorded after the game ended",
                    guess.guess_number
                )));
            }

            let word = normalize_guess(&guess.guessed_word, &config)
                .map_err(|e| corrupt(format!("stored guess {}: {}", expected, e)))?;
            session.apply(word);
        }

        if stored_outcome.is_terminal() && stored_outcome != session.outcome {
            return Err(corrupt(format!(
                "stored outcome {:?} disagrees with replayed outcome {:?}",
                stored_outcome, session.outcome
            )));
        }

        Ok(session)
    }

    /// Submit a guess. Only valid while the game is in progress.
    ///
    /// Rejected guesses (bad input or a finished game) leave the session
    /// untouched.
    pub fn submit_guess(&mut self, raw: &str) -> GameResult<GuessOutcome> {
        if self.is_terminal() {
            return Err(GameError::IllegalStateTransition {
                session_id: self.id,
                outcome: self.outcome,
            });
        }

        let word = normalize_guess(raw, &self.config)?;
        let record = self.apply(word).clone();

        debug!(
            session_id = %self.id,
            guess_number = record.guess_number,
            outcome = ?self.outcome,
            "Guess accepted"
        );

        Ok(GuessOutcome {
            record,
            outcome: self.outcome,
        })
    }

    fn apply(&mut self, word: String) -> &GuessRecord {
        let feedback = FeedbackEvaluator::evaluate(&self.secret_word.text, &word);
        let solved = word == self.secret_word.text;

        self.guess_log.push(GuessRecord {
            guess_number: self.guess_log.len() as u32 + 1,
            word,
            feedback,
        });

        if solved {
            self.outcome = GameOutcome::Won;
        } else if self.guess_log.len() >= self.config.max_guesses {
            self.outcome = GameOutcome::Lost;
        }

        &self.guess_log[self.guess_log.len() - 1]
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn secret_word(&self) -> &SecretWord {
        &self.secret_word
    }

    pub fn guess_log(&self) -> &[GuessRecord] {
        &self.guess_log
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn played_date(&self) -> NaiveDate {
        self.played_date
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn remaining_guesses(&self) -> usize {
        self.config.max_guesses.saturating_sub(self.guess_log.len())
    }

    /// Snapshot safe to hand to the owner. The word is revealed only once the
    /// game is over.
    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            owner_id: self.owner_id,
            word_length: self.config.word_length as i32,
            max_guesses: self.config.max_guesses as i32,
            remaining_guesses: self.remaining_guesses() as i32,
            outcome: self.outcome,
            guesses: self.guess_log.iter().map(GuessRecord::to_entry).collect(),
            played_date: self.played_date.format("%Y-%m-%d").to_string(),
            revealed_word: self
                .is_terminal()
                .then(|| self.secret_word.text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;
    use uuid::Uuid;

    fn apple() -> SecretWord {
        SecretWord::new(1, "APPLE")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn new_session(config: GameConfig) -> GameSession {
        GameSession::new(Uuid::new_v4(), Uuid::new_v4(), apple(), today(), config)
    }

    fn stored(guesses: &[(u32, &str)], outcome: GameOutcome) -> StoredSession {
        StoredSession {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            secret_word: apple(),
            played_date: today(),
            word_length: 5,
            max_guesses: 5,
            outcome,
            guesses: guesses
                .iter()
                .map(|(n, w)| StoredGuess {
                    guess_number: *n,
                    guessed_word: w.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_new_session_is_in_progress() {
        let session = new_session(GameConfig::default());

        assert_eq!(session.outcome(), GameOutcome::InProgress);
        assert!(session.guess_log().is_empty());
        assert_eq!(session.remaining_guesses(), 5);
    }

    #[test]
    fn test_correct_guess_wins() {
        let mut session = new_session(GameConfig::default());

        let result = session.submit_guess("apple").unwrap();
        assert_eq!(result.outcome, GameOutcome::Won);
        assert_eq!(result.record.guess_number, 1);
        assert_eq!(result.record.feedback, vec![LetterStatus::Exact; 5]);
        assert_eq!(session.outcome(), GameOutcome::Won);
    }

    #[test]
    fn test_lost_exactly_after_last_guess() {
        let mut session = new_session(GameConfig::default());

        for (i, word) in ["GRAPE", "LEMON", "PEACH", "WORLD"].iter().enumerate() {
            let result = session.submit_guess(word).unwrap();
            assert_eq!(result.outcome, GameOutcome::InProgress, "after guess {}", i + 1);
        }

        let result = session.submit_guess("HEART").unwrap();
        assert_eq!(result.outcome, GameOutcome::Lost);
        assert_eq!(session.guess_log().len(), 5);
        assert_eq!(session.remaining_guesses(), 0);
    }

    #[test]
    fn test_win_on_last_guess() {
        let mut session = new_session(GameConfig::default());
        for word in ["GRAPE", "LEMON", "PEACH", "WORLD"] {
            session.submit_guess(word).unwrap();
        }

        let result = session.submit_guess("APPLE").unwrap();
        assert_eq!(result.outcome, GameOutcome::Won);
    }

    #[test]
    fn test_terminal_session_rejects_guesses() {
        let mut session = new_session(GameConfig::default());
        session.submit_guess("APPLE").unwrap();

        let err = session.submit_guess("GRAPE").unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalStateTransition {
                outcome: GameOutcome::Won,
                ..
            }
        ));
        assert_eq!(session.guess_log().len(), 1);
        assert_eq!(session.outcome(), GameOutcome::Won);

        // Even invalid input reports the state problem first
        let err = session.submit_guess("x").unwrap_err();
        assert!(matches!(err, GameError::IllegalStateTransition { .. }));
    }

    #[test]
    fn test_invalid_guess_leaves_state_unchanged() {
        let mut session = new_session(GameConfig::default());

        let err = session.submit_guess("app").unwrap_err();
        assert!(matches!(
            err,
            GameError::Validation(ValidationError::WrongLength { .. })
        ));
        let err = session.submit_guess("appl3").unwrap_err();
        assert!(matches!(
            err,
            GameError::Validation(ValidationError::NonAlphabetic { .. })
        ));

        assert!(session.guess_log().is_empty());
        assert_eq!(session.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_guess_numbers_contiguous_despite_rejections() {
        let mut session = new_session(GameConfig::default());

        session.submit_guess("GRAPE").unwrap();
        assert!(session.submit_guess("GR").is_err());
        assert!(session.submit_guess("GRAP3").is_err());
        session.submit_guess("LEMON").unwrap();
        assert!(session.submit_guess("").is_err());
        session.submit_guess("PEACH").unwrap();

        let numbers: Vec<u32> = session.guess_log().iter().map(|g| g.guess_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_guesses_are_normalized() {
        let mut session = new_session(GameConfig::default());
        let result = session.submit_guess(" grape ").unwrap();
        assert_eq!(result.record.word, "GRAPE");
    }

    #[test]
    fn test_alternate_config() {
        let config = GameConfig::new(4, 1, 1);
        let mut session =
            GameSession::new(Uuid::new_v4(), Uuid::new_v4(), SecretWord::new(7, "TREE"), today(), config);

        assert!(session.submit_guess("APPLE").is_err());
        let result = session.submit_guess("EVER").unwrap();
        assert_eq!(result.outcome, GameOutcome::Lost);
    }

    #[test]
    fn test_view_hides_secret_until_over() {
        let mut session = new_session(GameConfig::default());
        session.submit_guess("GRAPE").unwrap();

        let view = session.view();
        assert_eq!(view.revealed_word, None);
        assert_eq!(view.guesses.len(), 1);
        assert_eq!(view.remaining_guesses, 4);
        assert_eq!(view.played_date, "2024-03-14");

        session.submit_guess("APPLE").unwrap();
        let view = session.view();
        assert_eq!(view.revealed_word.as_deref(), Some("APPLE"));
        assert_eq!(view.outcome, GameOutcome::Won);
    }

    #[test]
    fn test_restore_replays_guesses() {
        let session = GameSession::restore(
            stored(&[(2, "LEMON"), (1, "GRAPE")], GameOutcome::InProgress),
            GameConfig::default(),
        )
        .unwrap();

        assert_eq!(session.guess_log().len(), 2);
        assert_eq!(session.guess_log()[0].word, "GRAPE");
        assert_eq!(session.guess_log()[1].guess_number, 2);
        assert_eq!(session.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_restore_picks_up_unfinalized_win() {
        let session = GameSession::restore(
            stored(&[(1, "GRAPE"), (2, "APPLE")], GameOutcome::InProgress),
            GameConfig::default(),
        )
        .unwrap();

        assert_eq!(session.outcome(), GameOutcome::Won);
    }

    #[test]
    fn test_restore_rejects_inconsistent_records() {
        let config = GameConfig::default();

        let gap = GameSession::restore(stored(&[(1, "GRAPE"), (3, "LEMON")], GameOutcome::InProgress), config);
        assert!(matches!(gap, Err(GameError::CorruptSession { .. })));

        let after_win = GameSession::restore(stored(&[(1, "APPLE"), (2, "LEMON")], GameOutcome::Won), config);
        assert!(matches!(after_win, Err(GameError::CorruptSession { .. })));

        let wrong_outcome = GameSession::restore(stored(&[(1, "GRAPE")], GameOutcome::Lost), config);
        assert!(matches!(wrong_outcome, Err(GameError::CorruptSession { .. })));

        let too_many = GameSession::restore(
            stored(
                &[(1, "GRAPE"), (2, "LEMON"), (3, "PEACH"), (4, "WORLD"), (5, "HEART"), (6, "MONEY")],
                GameOutcome::Lost,
            ),
            config,
        );
        assert!(matches!(too_many, Err(GameError::CorruptSession { .. })));
    }

    #[test]
    fn test_restore_keeps_creation_rules() {
        let lost = stored(
            &[(1, "GRAPE"), (2, "LEMON"), (3, "PEACH"), (4, "WORLD"), (5, "HEART")],
            GameOutcome::Lost,
        );

        // More guesses and longer words configured since the game was played
        let session = GameSession::restore(lost, GameConfig::new(6, 6, 3)).unwrap();
        assert_eq!(session.outcome(), GameOutcome::Lost);
        assert_eq!(session.config().word_length, 5);
        assert_eq!(session.config().max_guesses, 5);
        assert_eq!(session.config().daily_limit, 3);
        assert_eq!(session.view().max_guesses, 5);

        let mut open = GameSession::restore(
            stored(&[(1, "GRAPE")], GameOutcome::InProgress),
            GameConfig::new(6, 6, 3),
        )
        .unwrap();
        assert!(open.submit_guess("PEACHY").is_err());
        let result = open.submit_guess("APPLE").unwrap();
        assert_eq!(result.outcome, GameOutcome::Won);
    }

    #[test]
    fn test_restore_rejects_unplayable_rules() {
        let mut record = stored(&[], GameOutcome::InProgress);
        record.max_guesses = 0;

        let result = GameSession::restore(record, GameConfig::default());
        assert!(matches!(result, Err(GameError::CorruptSession { .. })));
    }
}
