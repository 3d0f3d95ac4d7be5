mod common;

use common::*;
use guess_core::{GameConfig, GameError, SessionLifecycle, ValidationError};
use guess_types::{GameOutcome, LetterStatus};
use uuid::Uuid;

#[tokio::test]
async fn test_start_session_persists_row() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::default());
    let user_id = Uuid::new_v4();

    let session = lifecycle.start_session(user_id, today()).await.unwrap();

    assert_eq!(session.outcome(), GameOutcome::InProgress);
    assert_eq!(session.owner_id(), user_id);
    assert_eq!(session.played_date(), today());

    let stored = store.session(session.id()).unwrap();
    assert_eq!(stored.owner_id, user_id);
    assert_eq!(stored.secret_word, apple());
    assert_eq!(stored.outcome, GameOutcome::InProgress);
}

#[tokio::test]
async fn test_daily_limit_blocks_fourth_game() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::default());
    let user_id = Uuid::new_v4();

    for _ in 0..3 {
        lifecycle.start_session(user_id, today()).await.unwrap();
    }

    let err = lifecycle.start_session(user_id, today()).await.unwrap_err();
    assert!(matches!(err, GameError::LimitExceeded { played: 3, limit: 3 }));
    assert_eq!(store.sessions().len(), 3);
}

#[tokio::test]
async fn test_daily_limit_is_per_user_and_per_day() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::new(5, 5, 1));
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    store.seed_session(alice, yesterday(), GameOutcome::Lost);

    lifecycle.start_session(alice, today()).await.unwrap();
    lifecycle.start_session(bob, today()).await.unwrap();
    assert!(lifecycle.start_session(alice, today()).await.is_err());

    let usage = lifecycle.usage(alice, today()).await.unwrap();
    assert_eq!(usage.played, 1);
    assert_eq!(usage.remaining, 0);
    assert_eq!(usage.date, "2024-03-14");

    let usage = lifecycle.usage(alice, yesterday()).await.unwrap();
    assert_eq!(usage.played, 1);
}

#[tokio::test]
async fn test_no_words_aborts_without_persisting() {
    let store = MemoryHistoryStore::new(&[apple()]);
    let lifecycle = SessionLifecycle::new(store.clone(), FixedWord(None), GameConfig::default());

    let err = lifecycle
        .start_session(Uuid::new_v4(), today())
        .await
        .unwrap_err();

    assert!(matches!(err, GameError::NoWordsAvailable));
    assert!(store.sessions().is_empty());
}

#[tokio::test]
async fn test_winning_game_is_persisted_and_finalized() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::default());
    let mut session = lifecycle.start_session(Uuid::new_v4(), today()).await.unwrap();

    let first = lifecycle.submit_guess(&mut session, "grape").await.unwrap();
    assert_eq!(first.outcome, GameOutcome::InProgress);

    let second = lifecycle.submit_guess(&mut session, "APPLE").await.unwrap();
    assert_eq!(second.outcome, GameOutcome::Won);
    assert_eq!(second.record.feedback, vec![LetterStatus::Exact; 5]);

    let stored = store.session(session.id()).unwrap();
    assert_eq!(stored.outcome, GameOutcome::Won);
    let words: Vec<(u32, &str)> = stored
        .guesses
        .iter()
        .map(|g| (g.guess_number, g.guessed_word.as_str()))
        .collect();
    assert_eq!(words, vec![(1, "GRAPE"), (2, "APPLE")]);
}

#[tokio::test]
async fn test_losing_game_after_max_guesses() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::default());
    let mut session = lifecycle.start_session(Uuid::new_v4(), today()).await.unwrap();

    for word in ["GRAPE", "JUICE", "LEMON", "PEACH"] {
        let result = lifecycle.submit_guess(&mut session, word).await.unwrap();
        assert_eq!(result.outcome, GameOutcome::InProgress);
        assert_eq!(store.session(session.id()).unwrap().outcome, GameOutcome::InProgress);
    }

    let result = lifecycle.submit_guess(&mut session, "WORLD").await.unwrap();
    assert_eq!(result.outcome, GameOutcome::Lost);
    assert_eq!(store.session(session.id()).unwrap().outcome, GameOutcome::Lost);

    let err = lifecycle.submit_guess(&mut session, "APPLE").await.unwrap_err();
    assert!(matches!(err, GameError::IllegalStateTransition { .. }));
    assert_eq!(store.session(session.id()).unwrap().guesses.len(), 5);
}

#[tokio::test]
async fn test_rejected_guess_persists_nothing() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::default());
    let mut session = lifecycle.start_session(Uuid::new_v4(), today()).await.unwrap();

    let err = lifecycle.submit_guess(&mut session, "toolong").await.unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationError::WrongLength { .. })
    ));
    assert!(store.session(session.id()).unwrap().guesses.is_empty());

    lifecycle.submit_guess(&mut session, "lemon").await.unwrap();
    let stored = store.session(session.id()).unwrap();
    assert_eq!(stored.guesses.len(), 1);
    assert_eq!(stored.guesses[0].guess_number, 1);
}

#[tokio::test]
async fn test_load_session_round_trip() {
    let (lifecycle, _store) = create_test_lifecycle(GameConfig::default());
    let mut session = lifecycle.start_session(Uuid::new_v4(), today()).await.unwrap();
    lifecycle.submit_guess(&mut session, "GRAPE").await.unwrap();
    lifecycle.submit_guess(&mut session, "PEACH").await.unwrap();

    let mut reloaded = lifecycle.load_session(session.id()).await.unwrap();
    assert_eq!(reloaded.guess_log(), session.guess_log());
    assert_eq!(reloaded.remaining_guesses(), 3);

    let result = lifecycle.submit_guess(&mut reloaded, "APPLE").await.unwrap();
    assert_eq!(result.record.guess_number, 3);
    assert_eq!(result.outcome, GameOutcome::Won);
}

#[tokio::test]
async fn test_load_session_finalizes_open_win() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::default());
    let session = lifecycle.start_session(Uuid::new_v4(), today()).await.unwrap();

    // Guess saved but the process died before finalizing
    guess_core::GameHistoryStore::append_guess(&store, session.id(), 1, "APPLE")
        .await
        .unwrap();

    let reloaded = lifecycle.load_session(session.id()).await.unwrap();
    assert_eq!(reloaded.outcome(), GameOutcome::Won);
    assert_eq!(store.session(session.id()).unwrap().outcome, GameOutcome::Won);
}

#[tokio::test]
async fn test_load_unknown_session() {
    let (lifecycle, _store) = create_test_lifecycle(GameConfig::default());
    let err = lifecycle.load_session(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, GameError::SessionNotFound { .. }));
}

#[tokio::test]
async fn test_sessions_keep_rules_after_config_change() {
    let (lifecycle, store) = create_test_lifecycle(GameConfig::new(5, 5, 3));
    let user_id = Uuid::new_v4();

    let mut lost = lifecycle.start_session(user_id, today()).await.unwrap();
    for word in ["GRAPE", "JUICE", "LEMON", "PEACH", "WORLD"] {
        lifecycle.submit_guess(&mut lost, word).await.unwrap();
    }
    let mut open = lifecycle.start_session(user_id, today()).await.unwrap();
    lifecycle.submit_guess(&mut open, "GRAPE").await.unwrap();

    // Same store, restarted with longer words and more guesses
    let changed = SessionLifecycle::new(
        store.clone(),
        FixedWord(Some(apple())),
        GameConfig::new(6, 6, 3),
    );

    let reloaded = changed.load_session(lost.id()).await.unwrap();
    assert_eq!(reloaded.outcome(), GameOutcome::Lost);
    assert_eq!(reloaded.remaining_guesses(), 0);

    let mut reloaded = changed.load_session(open.id()).await.unwrap();
    assert_eq!(reloaded.view().word_length, 5);
    assert_eq!(reloaded.remaining_guesses(), 4);
    let result = changed.submit_guess(&mut reloaded, "APPLE").await.unwrap();
    assert_eq!(result.outcome, GameOutcome::Won);
    assert_eq!(store.session(open.id()).unwrap().outcome, GameOutcome::Won);
}
