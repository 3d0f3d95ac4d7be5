use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;
use crate::m20240101_000002_create_secret_words_table::SecretWords;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameHistory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameHistory::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GameHistory::UserId).uuid().not_null())
                    .col(ColumnDef::new(GameHistory::SecretWordId).integer().not_null())
                    // Rules in force when the game started
                    .col(ColumnDef::new(GameHistory::WordLength).integer().not_null())
                    .col(ColumnDef::new(GameHistory::MaxGuesses).integer().not_null())
                    .col(
                        ColumnDef::new(GameHistory::Outcome)
                            .string()
                            .not_null()
                            .default("in_progress"),
                    )
                    .col(
                        ColumnDef::new(GameHistory::IsWon)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(GameHistory::DatePlayed).date().not_null())
                    .col(
                        ColumnDef::new(GameHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_history_user")
                            .from(GameHistory::Table, GameHistory::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_history_secret_word")
                            .from(GameHistory::Table, GameHistory::SecretWordId)
                            .to(SecretWords::Table, SecretWords::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Daily play count per user
        manager
            .create_index(
                Index::create()
                    .name("idx_game_history_user_date")
                    .table(GameHistory::Table)
                    .col(GameHistory::UserId)
                    .col(GameHistory::DatePlayed)
                    .to_owned(),
            )
            .await?;

        // Daily report
        manager
            .create_index(
                Index::create()
                    .name("idx_game_history_date")
                    .table(GameHistory::Table)
                    .col(GameHistory::DatePlayed)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum GameHistory {
    Table,
    Id,
    UserId,
    SecretWordId,
    WordLength,
    MaxGuesses,
    Outcome,
    IsWon,
    DatePlayed,
    CreatedAt,
}
