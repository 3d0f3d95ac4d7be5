use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Reference word pool seeded on first migration
const SEED_WORDS: [&str; 20] = [
    "APPLE", "GRAPE", "JUICE", "LEMON", "PEACH", "WORLD", "LIGHT", "HEART", "MONEY", "STORE",
    "TABLE", "CHAIR", "WATER", "EARTH", "PLANT", "SPACE", "DREAM", "SHIFT", "BREAK", "TRAIN",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecretWords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SecretWords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SecretWords::Word)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(SecretWords::Table)
            .columns([SecretWords::Word])
            .on_conflict(
                OnConflict::column(SecretWords::Word)
                    .do_nothing()
                    .to_owned(),
            );
        for word in SEED_WORDS {
            seed.values([word.into()])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SecretWords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum SecretWords {
    Table,
    Id,
    Word,
}
