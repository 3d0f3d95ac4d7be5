use guess_types::{LetterResult, LetterStatus};
use std::collections::HashMap;

pub struct FeedbackEvaluator;

impl FeedbackEvaluator {
    /// Evaluate a guess against the secret word, one verdict per guess letter.
    ///
    /// Both words are compared case-insensitively. Every letter instance of the
    /// secret can be claimed at most once across both passes, so a repeated
    /// guess letter is never reported more often than it occurs in the secret.
    pub fn evaluate(secret: &str, guess: &str) -> Vec<LetterStatus> {
        let secret_chars: Vec<char> = secret.to_uppercase().chars().collect();
        let guess_chars: Vec<char> = guess.to_uppercase().chars().collect();

        let mut statuses = vec![LetterStatus::Absent; guess_chars.len()];

        // Unclaimed letter instances of the secret
        let mut remaining = HashMap::new();
        for ch in &secret_chars {
            *remaining.entry(*ch).or_insert(0u32) += 1;
        }

        // First pass: exact positions
        for (i, &ch) in guess_chars.iter().enumerate() {
            if i < secret_chars.len() && ch == secret_chars[i] {
                statuses[i] = LetterStatus::Exact;
                if let Some(count) = remaining.get_mut(&ch) {
                    *count -= 1;
                }
            }
        }

        // Second pass: present letters out of what is left
        for (i, &ch) in guess_chars.iter().enumerate() {
            if i >= secret_chars.len() || statuses[i] == LetterStatus::Exact {
                continue;
            }

            match remaining.get_mut(&ch) {
                Some(count) if *count > 0 => {
                    statuses[i] = LetterStatus::Present;
                    *count -= 1;
                }
                _ => {}
            }
        }

        statuses
    }

    /// Same as [`FeedbackEvaluator::evaluate`], paired with the guessed letters
    /// for display.
    pub fn evaluate_letters(secret: &str, guess: &str) -> Vec<LetterResult> {
        let statuses = Self::evaluate(secret, guess);
        Self::to_letters(guess, &statuses)
    }

    pub fn to_letters(guess: &str, statuses: &[LetterStatus]) -> Vec<LetterResult> {
        guess
            .to_uppercase()
            .chars()
            .zip(statuses.iter())
            .enumerate()
            .map(|(i, (ch, status))| LetterResult {
                letter: ch.to_string(),
                status: *status,
                position: i as i32,
            })
            .collect()
    }

    pub fn is_solved(statuses: &[LetterStatus]) -> bool {
        !statuses.is_empty() && statuses.iter().all(|s| *s == LetterStatus::Exact)
    }
}
