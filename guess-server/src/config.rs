use std::env;
use std::str::FromStr;

use guess_core::GameConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
    #[error("{name} must be at least 1")]
    MustBePositive { name: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub words_file: Option<String>,
    pub word_length: usize,
    pub max_guesses: usize,
    pub max_daily_games: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| {
                guess_persistence::connection::DEFAULT_DATABASE_URL.to_string()
            }),
            words_file: env::var("WORDS_FILE").ok(),
            word_length: parse_var("WORD_LENGTH", guess_core::DEFAULT_WORD_LENGTH)?,
            max_guesses: parse_var("MAX_GUESSES", guess_core::DEFAULT_MAX_GUESSES)?,
            max_daily_games: parse_var("MAX_DAILY_GAMES", guess_core::DEFAULT_DAILY_LIMIT)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.word_length == 0 {
            return Err(ConfigError::MustBePositive { name: "WORD_LENGTH" });
        }
        if self.max_guesses == 0 {
            return Err(ConfigError::MustBePositive { name: "MAX_GUESSES" });
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.word_length, self.max_guesses, self.max_daily_games)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
