use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "secret_words")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub word: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_history::Entity")]
    GameHistory,
}

impl Related<super::game_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
