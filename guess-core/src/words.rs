use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::validation::is_alphabetic;
use crate::{GameError, GameResult};

/// A target word and the identifier it is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretWord {
    pub id: i32,
    pub text: String,
}

impl SecretWord {
    pub fn new(id: i32, text: impl AsRef<str>) -> Self {
        Self {
            id,
            text: text.as_ref().trim().to_uppercase(),
        }
    }
}

/// Where secret words come from. `None` means the pool is empty.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn random_word(&self) -> anyhow::Result<Option<SecretWord>>;
}

/// Pick a secret word, turning an empty pool into `NoWordsAvailable`
pub async fn pick_secret_word<W: WordSource + ?Sized>(source: &W) -> GameResult<SecretWord> {
    source
        .random_word()
        .await
        .map_err(GameError::Storage)?
        .ok_or(GameError::NoWordsAvailable)
}

/// In-memory word pool with an injectable random number generator
pub struct WordPool {
    words: Vec<SecretWord>,
    rng: Mutex<StdRng>,
}

impl WordPool {
    /// Build a pool from a word list, one word per line. Blank lines, `#`
    /// comments and words of the wrong length are skipped.
    pub fn from_word_list(word_list: &str, word_length: usize) -> Self {
        Self::with_rng(word_list, word_length, StdRng::from_os_rng())
    }

    pub fn with_rng(word_list: &str, word_length: usize, rng: StdRng) -> Self {
        let unique: BTreeSet<String> = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_uppercase)
            .filter(|word| word.chars().count() == word_length && is_alphabetic(word))
            .collect();

        let words = unique
            .into_iter()
            .enumerate()
            .map(|(i, text)| SecretWord {
                id: i as i32 + 1,
                text,
            })
            .collect();

        Self {
            words,
            rng: Mutex::new(rng),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[SecretWord] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_uppercase();
        self.words.iter().any(|w| w.text == word)
    }

    /// Uniform pick over the pool
    pub fn pick(&self) -> Option<SecretWord> {
        if self.words.is_empty() {
            return None;
        }

        let index = match self.rng.lock() {
            Ok(mut rng) => rng.random_range(0..self.words.len()),
            Err(poisoned) => poisoned.into_inner().random_range(0..self.words.len()),
        };
        Some(self.words[index].clone())
    }
}

#[async_trait]
impl WordSource for WordPool {
    async fn random_word(&self) -> anyhow::Result<Option<SecretWord>> {
        Ok(self.pick())
    }
}
