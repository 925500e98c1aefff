//! Audit log entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use palisade_core::ports::AuditEvent;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(nullable)]
    pub actor_id: Option<Uuid>,
    pub action: String,
    pub detail: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<AuditEvent> for ActiveModel {
    fn from(event: AuditEvent) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            actor_id: Set(event.actor_id),
            action: Set(event.action.as_str().to_string()),
            detail: Set(event.detail),
            created_at: Set(event.at.into()),
        }
    }
}
