use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub created_at: DateTimeWithTimeZone,
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
