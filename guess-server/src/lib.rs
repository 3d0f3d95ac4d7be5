use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;

use crate::locks::UserLocks;
use guess_core::{GameConfig, GameError, GameSession, SessionLifecycle};
use guess_persistence::repositories::{
    HistoryRepository, ReportRepository, UserRepository, WordRepository,
};
use guess_types::{
    ApiError, CreateUserRequest, ErrorKind, GameOutcome, GuessResponse, SubmitGuessRequest, User,
};

pub mod config;
pub mod locks;
pub mod validation;

pub const USER_HEADER: &str = "x-user-id";

pub type Lifecycle = SessionLifecycle<HistoryRepository, WordRepository>;
type ApiReply = warp::reply::WithStatus<warp::reply::Json>;

#[derive(Deserialize)]
struct DailyReportQuery {
    date: Option<String>,
}

#[derive(Serialize)]
struct UserHistoryResponse {
    user: User,
    history: Vec<guess_types::UserDailyHistory>,
}

/// Everything a request handler needs
pub struct AppState {
    pub lifecycle: Lifecycle,
    pub users: UserRepository,
    pub reports: ReportRepository,
    pub locks: UserLocks,
}

impl AppState {
    pub fn new(db: sea_orm::DatabaseConnection, config: GameConfig) -> Self {
        Self {
            lifecycle: SessionLifecycle::new(
                HistoryRepository::new(db.clone()),
                WordRepository::new(db.clone(), config.word_length),
                config,
            ),
            users: UserRepository::new(db.clone()),
            reports: ReportRepository::new(db),
            locks: UserLocks::new(),
        }
    }
}

/// Server-local calendar date used for daily limits
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn create_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());
    let user_header = warp::header::optional::<String>(USER_HEADER);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let create_user = warp::path("users")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(handle_create_user);

    let usage = warp::path!("users" / String / "usage")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_usage_request);

    let start_game = warp::path("games")
        .and(warp::path::end())
        .and(warp::post())
        .and(user_header.clone())
        .and(state_filter.clone())
        .and_then(handle_start_game);

    let game_state = warp::path!("games" / String)
        .and(warp::get())
        .and(user_header.clone())
        .and(state_filter.clone())
        .and_then(handle_game_state_request);

    let submit_guess = warp::path!("games" / String / "guesses")
        .and(warp::post())
        .and(user_header)
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(handle_submit_guess);

    let daily_report = warp::path!("reports" / "daily")
        .and(warp::get())
        .and(warp::query::<DailyReportQuery>())
        .and(state_filter.clone())
        .and_then(handle_daily_report);

    let user_report = warp::path!("reports" / "users" / String)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_user_report);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", USER_HEADER])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(create_user)
        .or(usage)
        .or(start_game)
        .or(game_state)
        .or(submit_guess)
        .or(daily_report)
        .or(user_report)
        .with(cors)
        .with(warp::log("guess_the_word"))
}

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> ApiReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(kind: ErrorKind, message: impl Into<String>, status: StatusCode) -> ApiReply {
    json_reply(&ApiError::new(kind, message), status)
}

fn game_error_reply(err: &GameError) -> ApiReply {
    match err {
        GameError::Validation(e) => {
            error_reply(ErrorKind::Validation, e.to_string(), StatusCode::BAD_REQUEST)
        }
        GameError::IllegalStateTransition { .. } => {
            error_reply(ErrorKind::IllegalState, err.to_string(), StatusCode::CONFLICT)
        }
        GameError::LimitExceeded { limit, .. } => error_reply(
            ErrorKind::LimitExceeded,
            format!(
                "You have reached the daily limit of {} games. Try again tomorrow!",
                limit
            ),
            StatusCode::TOO_MANY_REQUESTS,
        ),
        GameError::NoWordsAvailable => error_reply(
            ErrorKind::NoWordsAvailable,
            "Could not start game. No secret words available.",
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        GameError::SessionNotFound { .. } => {
            error_reply(ErrorKind::NotFound, "Game not found", StatusCode::NOT_FOUND)
        }
        GameError::CorruptSession { .. } | GameError::Storage(_) => {
            error!("Request failed: {:#}", err);
            error_reply(
                ErrorKind::Internal,
                "Internal server error",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

fn internal_error(context: &str, err: anyhow::Error) -> ApiReply {
    error!("{}: {:#}", context, err);
    error_reply(ErrorKind::Internal, context, StatusCode::INTERNAL_SERVER_ERROR)
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, ApiReply> {
    Uuid::parse_str(value).map_err(|_| {
        error_reply(
            ErrorKind::Validation,
            format!("Invalid {} ID format", what),
            StatusCode::BAD_REQUEST,
        )
    })
}

/// Resolve the calling user from the `x-user-id` header
async fn authenticate(user_header: Option<String>, state: &AppState) -> Result<User, ApiReply> {
    let Some(raw_id) = user_header else {
        return Err(error_reply(
            ErrorKind::AuthenticationRequired,
            "Authentication required",
            StatusCode::UNAUTHORIZED,
        ));
    };

    let user_id = Uuid::parse_str(raw_id.trim()).map_err(|_| {
        error_reply(
            ErrorKind::AuthenticationRequired,
            "Invalid user ID",
            StatusCode::UNAUTHORIZED,
        )
    })?;

    match state.users.find_by_id(user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(error_reply(
            ErrorKind::AuthenticationRequired,
            "Unknown user",
            StatusCode::UNAUTHORIZED,
        )),
        Err(err) => Err(internal_error("Failed to look up user", err)),
    }
}

/// Load a session and make sure it belongs to `user`
async fn load_owned_session(
    game_id: &str,
    user: &User,
    state: &AppState,
) -> Result<GameSession, ApiReply> {
    let session_id = parse_uuid(game_id, "game")?;
    let session = state
        .lifecycle
        .load_session(session_id)
        .await
        .map_err(|e| game_error_reply(&e))?;

    if session.owner_id() != user.id {
        return Err(error_reply(
            ErrorKind::Forbidden,
            "Not authorized to view this game",
            StatusCode::FORBIDDEN,
        ));
    }
    Ok(session)
}

async fn handle_create_user(
    request: CreateUserRequest,
    state: Arc<AppState>,
) -> Result<ApiReply, warp::Rejection> {
    let username = request.username;
    if let Err(message) = validation::validate_username(&username) {
        return Ok(error_reply(
            ErrorKind::Validation,
            message,
            StatusCode::BAD_REQUEST,
        ));
    }

    match state.users.find_by_username(&username).await {
        Ok(Some(_)) => {
            return Ok(error_reply(
                ErrorKind::Validation,
                "Username already exists. Please choose another.",
                StatusCode::CONFLICT,
            ));
        }
        Ok(None) => {}
        Err(err) => return Ok(internal_error("Failed to look up user", err)),
    }

    match state.users.create_user(&username).await {
        Ok(user) => Ok(json_reply(&user, StatusCode::CREATED)),
        Err(err) => Ok(internal_error("Failed to create user", err)),
    }
}

async fn handle_usage_request(
    user_id: String,
    state: Arc<AppState>,
) -> Result<ApiReply, warp::Rejection> {
    let user_id = match parse_uuid(&user_id, "user") {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    match state.users.find_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(error_reply(
                ErrorKind::NotFound,
                "User not found",
                StatusCode::NOT_FOUND,
            ));
        }
        Err(err) => return Ok(internal_error("Failed to look up user", err)),
    }

    match state.lifecycle.usage(user_id, today()).await {
        Ok(usage) => Ok(json_reply(&usage, StatusCode::OK)),
        Err(err) => Ok(game_error_reply(&err)),
    }
}

async fn handle_start_game(
    user_header: Option<String>,
    state: Arc<AppState>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(user_header, &state).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    let _guard = state.locks.acquire(user.id).await;

    // A user plays one game at a time; hand back the open one instead
    match state.lifecycle.store().find_open_session(user.id).await {
        Ok(Some(session_id)) => match state.lifecycle.load_session(session_id).await {
            Ok(session) if !session.is_terminal() => {
                info!(user_id = %user.id, %session_id, "Resuming open game");
                return Ok(json_reply(&session.view(), StatusCode::OK));
            }
            Ok(_) => {}
            Err(err) => return Ok(game_error_reply(&err)),
        },
        Ok(None) => {}
        Err(err) => return Ok(internal_error("Failed to look up open game", err)),
    }

    match state.lifecycle.start_session(user.id, today()).await {
        Ok(session) => Ok(json_reply(&session.view(), StatusCode::CREATED)),
        Err(err) => Ok(game_error_reply(&err)),
    }
}

async fn handle_game_state_request(
    game_id: String,
    user_header: Option<String>,
    state: Arc<AppState>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(user_header, &state).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match load_owned_session(&game_id, &user, &state).await {
        Ok(session) => Ok(json_reply(&session.view(), StatusCode::OK)),
        Err(reply) => Ok(reply),
    }
}

async fn handle_submit_guess(
    game_id: String,
    user_header: Option<String>,
    request: SubmitGuessRequest,
    state: Arc<AppState>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match authenticate(user_header, &state).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    let _guard = state.locks.acquire(user.id).await;

    let mut session = match load_owned_session(&game_id, &user, &state).await {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let result = match state
        .lifecycle
        .submit_guess(&mut session, &request.guess)
        .await
    {
        Ok(result) => result,
        Err(err) => return Ok(game_error_reply(&err)),
    };

    let message = match result.outcome {
        GameOutcome::Won => Some(format!(
            "CONGRATULATIONS! You won in {} guesses!",
            result.record.guess_number
        )),
        GameOutcome::Lost => Some(format!(
            "Better luck next time! The word was: {}",
            session.secret_word().text
        )),
        GameOutcome::InProgress => None,
    };

    let response = GuessResponse {
        entry: result.record.to_entry(),
        outcome: result.outcome,
        session: session.view(),
        message,
    };
    Ok(json_reply(&response, StatusCode::OK))
}

async fn handle_daily_report(
    query: DailyReportQuery,
    state: Arc<AppState>,
) -> Result<ApiReply, warp::Rejection> {
    let date = match query.date.as_deref().map(str::trim) {
        None | Some("") => today(),
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                return Ok(error_reply(
                    ErrorKind::Validation,
                    "Invalid date, expected YYYY-MM-DD",
                    StatusCode::BAD_REQUEST,
                ));
            }
        },
    };

    match state.reports.daily_report(date).await {
        Ok(report) => Ok(json_reply(&report, StatusCode::OK)),
        Err(err) => Ok(internal_error("Failed to build daily report", err)),
    }
}

async fn handle_user_report(
    username: String,
    state: Arc<AppState>,
) -> Result<ApiReply, warp::Rejection> {
    let user = match state.users.find_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(error_reply(
                ErrorKind::NotFound,
                format!("No game history found for user '{}'", username),
                StatusCode::NOT_FOUND,
            ));
        }
        Err(err) => return Ok(internal_error("Failed to look up user", err)),
    };

    match state.reports.user_history(user.id).await {
        Ok(history) => Ok(json_reply(
            &UserHistoryResponse { user, history },
            StatusCode::OK,
        )),
        Err(err) => Ok(internal_error("Failed to build user report", err)),
    }
}
