//! Banned word entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use palisade_core::domain::BannedWord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "banned_words")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub word: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BannedWord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            word: model.word,
            created_at: model.created_at.into(),
        }
    }
}

impl From<BannedWord> for ActiveModel {
    fn from(word: BannedWord) -> Self {
        Self {
            id: Set(word.id),
            word: Set(word.word),
            created_at: Set(word.created_at.into()),
        }
    }
}
