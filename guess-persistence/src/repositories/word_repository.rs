use anyhow::Result;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

use crate::entities::{prelude::*, secret_words};
use guess_core::{SecretWord, WordPool, WordSource};

/// Secret words stored in the `secret_words` table, restricted to one word length
pub struct WordRepository {
    db: DatabaseConnection,
    word_length: usize,
}

impl WordRepository {
    pub fn new(db: DatabaseConnection, word_length: usize) -> Self {
        Self { db, word_length }
    }

    fn length_filter(&self) -> sea_orm::sea_query::SimpleExpr {
        Expr::cust_with_values("LENGTH(word) = ?", [self.word_length as i32])
    }

    /// Add every usable word of a word list. Words already present are skipped.
    /// Returns the number of distinct usable words in the list.
    pub async fn import_word_list(&self, word_list: &str) -> Result<usize> {
        let pool = WordPool::from_word_list(word_list, self.word_length);
        let words: Vec<String> = pool.words().iter().map(|w| w.text.clone()).collect();

        if words.is_empty() {
            return Ok(0);
        }

        let models = words.iter().map(|word| secret_words::ActiveModel {
            id: ActiveValue::NotSet,
            word: ActiveValue::Set(word.clone()),
        });

        SecretWords::insert_many(models)
            .on_conflict(
                OnConflict::column(secret_words::Column::Word)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await?;

        debug!(count = words.len(), "Imported word list");
        Ok(words.len())
    }

    pub async fn word_count(&self) -> Result<u64> {
        let count = SecretWords::find()
            .filter(self.length_filter())
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl WordSource for WordRepository {
    async fn random_word(&self) -> Result<Option<SecretWord>> {
        let model = SecretWords::find()
            .filter(self.length_filter())
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .one(&self.db)
            .await?;

        Ok(model.map(|m| SecretWord::new(m.id, m.word)))
    }
}
