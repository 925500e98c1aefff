//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use palisade_core::domain::{BannedWord, ContentItem, ContentStatus, Report};
use palisade_core::error::RepoError;
use palisade_core::ports::{BannedWordRepository, ContentRepository, ReportRepository};

use super::entity::banned_word::{self, Entity as BannedWordEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::report::{self, Entity as ReportEntity};

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn insert_err(e: sea_orm::DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint(err_str)
    } else {
        RepoError::Query(err_str)
    }
}

/// PostgreSQL content repository.
pub struct PostgresContentRepository {
    db: DbConn,
}

impl PostgresContentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentItem>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ContentStatus,
        hide_reason: Option<String>,
    ) -> Result<(), RepoError> {
        let row = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: post::ActiveModel = row.into();
        active.status = Set(status.into());
        active.hide_reason = Set(hide_reason);
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(query_err)?;
        Ok(())
    }
}

/// PostgreSQL report repository.
pub struct PostgresReportRepository {
    db: DbConn,
}

impl PostgresReportRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn exists(&self, reporter_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        let found = ReportEntity::find()
            .filter(report::Column::ReporterId.eq(reporter_id))
            .filter(report::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(found.is_some())
    }

    async fn insert(&self, new_report: Report) -> Result<Report, RepoError> {
        let active: report::ActiveModel = new_report.into();
        let model = active.insert(&self.db).await.map_err(insert_err)?;
        Ok(model.into())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        ReportEntity::find()
            .filter(report::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }
}

/// PostgreSQL banned word repository.
pub struct PostgresBannedWordRepository {
    db: DbConn,
}

impl PostgresBannedWordRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BannedWordRepository for PostgresBannedWordRepository {
    async fn all_words(&self) -> Result<Vec<String>, RepoError> {
        BannedWordEntity::find()
            .select_only()
            .column(banned_word::Column::Word)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(query_err)
    }

    async fn list(&self) -> Result<Vec<BannedWord>, RepoError> {
        let rows = BannedWordEntity::find()
            .order_by_desc(banned_word::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_word(&self, word: &str) -> Result<Option<BannedWord>, RepoError> {
        let result = BannedWordEntity::find()
            .filter(banned_word::Column::Word.eq(word))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BannedWord>, RepoError> {
        let result = BannedWordEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, word: BannedWord) -> Result<BannedWord, RepoError> {
        let active: banned_word::ActiveModel = word.into();
        let model = active.insert(&self.db).await.map_err(insert_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = BannedWordEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
