use regex::Regex;
use std::sync::LazyLock;

static FIVE_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{5,}").expect("username pattern is valid"));

/// Usernames need a run of at least five letters and no surrounding whitespace.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim() != username || username.is_empty() {
        return Err("Username must not be empty or padded with spaces.".to_string());
    }
    if username.chars().count() < 5 || !FIVE_LETTERS.is_match(username) {
        return Err("Username must be at least 5 characters and contain 5 letters.".to_string());
    }
    Ok(())
}
