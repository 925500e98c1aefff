//! Report entity for SeaORM.
//!
//! The `(reporter_id, post_id)` unique index is the storage-level backstop
//! for the pipeline's duplicate-report check.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use palisade_core::domain::{Report, ReportStatus};

/// Review state as stored in the `status` column.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReportState {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
}

impl From<ReportStatus> for ReportState {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Pending => ReportState::Pending,
            ReportStatus::Reviewed => ReportState::Reviewed,
        }
    }
}

impl From<ReportState> for ReportStatus {
    fn from(state: ReportState) -> Self {
        match state {
            ReportState::Pending => ReportStatus::Pending,
            ReportState::Reviewed => ReportStatus::Reviewed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub post_id: Uuid,
    pub reason: String,
    pub status: ReportState,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Report {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            reporter_id: model.reporter_id,
            post_id: model.post_id,
            reason: model.reason,
            status: model.status.into(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Report> for ActiveModel {
    fn from(report: Report) -> Self {
        Self {
            id: Set(report.id),
            reporter_id: Set(report.reporter_id),
            post_id: Set(report.post_id),
            reason: Set(report.reason),
            status: Set(report.status.into()),
            created_at: Set(report.created_at.into()),
            updated_at: Set(report.updated_at.into()),
        }
    }
}
