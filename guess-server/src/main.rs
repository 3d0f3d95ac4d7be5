use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use guess_persistence::{WordRepository, connect_and_migrate};
use guess_server::{AppState, config::Config, create_routes};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Guess the Word server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let game_config = config.game_config();
    info!(
        word_length = game_config.word_length,
        max_guesses = game_config.max_guesses,
        daily_limit = game_config.daily_limit,
        "Game rules loaded"
    );

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database and run migrations: {:#}", e);
            std::process::exit(1);
        }
    };

    let words = WordRepository::new(db.clone(), game_config.word_length);
    if let Some(path) = &config.words_file {
        info!("Importing words from file: {}", path);
        let imported = match tokio::fs::read_to_string(path).await {
            Ok(contents) => words.import_word_list(&contents).await,
            Err(e) => Err(e.into()),
        };
        match imported {
            Ok(count) => info!("Imported {} new words", count),
            Err(e) => {
                error!("Failed to import words from '{}': {:#}", path, e);
                std::process::exit(1);
            }
        }
    }

    match words.word_count().await {
        Ok(0) => warn!(
            "No {}-letter secret words available, new games will be refused",
            game_config.word_length
        ),
        Ok(count) => info!("{} secret words available", count),
        Err(e) => warn!("Could not count secret words: {:#}", e),
    }

    let state = Arc::new(AppState::new(db, game_config));
    let routes = create_routes(state.clone());

    // Start cleanup task
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            cleanup_state.locks.prune();
        }
    });

    let host = match config.host.parse::<std::net::IpAddr>() {
        Ok(host) => host,
        Err(e) => {
            error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}:{}", host, config.port);

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown((host, config.port), shutdown_signal());

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use signal::unix::{SignalKind, signal};

        let (mut sigint, mut sigterm) =
            match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
                (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
                _ => {
                    error!("Failed to install signal handlers");
                    return std::future::pending().await;
                }
            };

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
            return std::future::pending().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
