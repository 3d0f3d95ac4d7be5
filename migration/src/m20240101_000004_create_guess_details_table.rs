use sea_orm_migration::prelude::*;

use crate::m20240101_000003_create_game_history_table::GameHistory;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuessDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GuessDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GuessDetails::HistoryId).uuid().not_null())
                    .col(ColumnDef::new(GuessDetails::GuessNumber).integer().not_null())
                    .col(ColumnDef::new(GuessDetails::GuessedWord).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guess_details_history")
                            .from(GuessDetails::Table, GuessDetails::HistoryId)
                            .to(GameHistory::Table, GameHistory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per attempt
        manager
            .create_index(
                Index::create()
                    .name("idx_guess_details_history_number")
                    .table(GuessDetails::Table)
                    .col(GuessDetails::HistoryId)
                    .col(GuessDetails::GuessNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuessDetails::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GuessDetails {
    Table,
    Id,
    HistoryId,
    GuessNumber,
    GuessedWord,
}
