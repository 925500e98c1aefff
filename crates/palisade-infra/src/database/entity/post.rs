//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use palisade_core::domain::{ContentItem, ContentStatus};

/// Visibility state as stored in the `status` column.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PostStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "hidden")]
    Hidden,
}

impl From<ContentStatus> for PostStatus {
    fn from(status: ContentStatus) -> Self {
        match status {
            ContentStatus::Active => PostStatus::Active,
            ContentStatus::Pending => PostStatus::Pending,
            ContentStatus::Hidden => PostStatus::Hidden,
        }
    }
}

impl From<PostStatus> for ContentStatus {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Active => ContentStatus::Active,
            PostStatus::Pending => ContentStatus::Pending,
            PostStatus::Hidden => ContentStatus::Hidden,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub status: PostStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub hide_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain ContentItem.
impl From<Model> for ContentItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            body: model.body,
            status: model.status.into(),
            hide_reason: model.hide_reason,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain ContentItem to SeaORM ActiveModel.
impl From<ContentItem> for ActiveModel {
    fn from(item: ContentItem) -> Self {
        Self {
            id: Set(item.id),
            author_id: Set(item.author_id),
            title: Set(item.title),
            body: Set(item.body),
            status: Set(item.status.into()),
            hide_reason: Set(item.hide_reason),
            created_at: Set(item.created_at.into()),
            updated_at: Set(item.updated_at.into()),
        }
    }
}
