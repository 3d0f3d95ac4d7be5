use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub secret_word_id: i32,
    pub word_length: i32,
    pub max_guesses: i32,
    pub outcome: String,
    pub is_won: bool,
    pub date_played: Date,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::secret_words::Entity",
        from = "Column::SecretWordId",
        to = "super::secret_words::Column::Id"
    )]
    SecretWords,
    #[sea_orm(has_many = "super::guess_details::Entity")]
    GuessDetails,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::secret_words::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SecretWords.def()
    }
}

impl Related<super::guess_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuessDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
