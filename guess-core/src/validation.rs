use crate::{GameConfig, ValidationError};

/// Trim and uppercase a raw guess, then check it against the configured
/// word length. Returns the normalized word.
pub fn normalize_guess(raw: &str, config: &GameConfig) -> Result<String, ValidationError> {
    let word = raw.trim().to_uppercase();

    if !is_alphabetic(&word) {
        return Err(ValidationError::NonAlphabetic { word });
    }

    let length = word.chars().count();
    if length != config.word_length {
        return Err(ValidationError::WrongLength {
            expected: config.word_length,
            actual: length,
        });
    }

    Ok(word)
}

/// Check if word contains only ASCII letters
pub fn is_alphabetic(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic())
}
