use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guess_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub history_id: Uuid,
    pub guess_number: i32,
    pub guessed_word: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_history::Entity",
        from = "Column::HistoryId",
        to = "super::game_history::Column::Id"
    )]
    GameHistory,
}

impl Related<super::game_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
