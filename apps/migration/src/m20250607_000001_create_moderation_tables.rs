//! Creates the moderation schema: posts, reports, banned_words, audit_logs.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(uuid(Posts::Id).primary_key())
                    .col(uuid(Posts::AuthorId))
                    .col(string_len(Posts::Title, 200))
                    .col(text(Posts::Body))
                    .col(string_len(Posts::Status, 20))
                    .col(text_null(Posts::HideReason))
                    .col(timestamp_with_time_zone(Posts::CreatedAt))
                    .col(timestamp_with_time_zone(Posts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(uuid(Reports::Id).primary_key())
                    .col(uuid(Reports::ReporterId))
                    .col(uuid(Reports::PostId))
                    .col(string_len(Reports::Reason, 255))
                    .col(string_len(Reports::Status, 20))
                    .col(timestamp_with_time_zone(Reports::CreatedAt))
                    .col(timestamp_with_time_zone(Reports::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_post")
                            .from(Reports::Table, Reports::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backstop for the pipeline's duplicate-report check: racing inserts
        // hit this index instead of producing duplicate rows.
        manager
            .create_index(
                Index::create()
                    .name("idx_reports_reporter_id_post_id")
                    .table(Reports::Table)
                    .col(Reports::ReporterId)
                    .col(Reports::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BannedWords::Table)
                    .if_not_exists()
                    .col(uuid(BannedWords::Id).primary_key())
                    .col(string_len_uniq(BannedWords::Word, 100))
                    .col(timestamp_with_time_zone(BannedWords::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(uuid(AuditLogs::Id).primary_key())
                    .col(uuid_null(AuditLogs::ActorId))
                    .col(string_len(AuditLogs::Action, 50))
                    .col(json(AuditLogs::Detail))
                    .col(timestamp_with_time_zone(AuditLogs::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BannedWords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    Title,
    Body,
    Status,
    HideReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    ReporterId,
    PostId,
    Reason,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BannedWords {
    Table,
    Id,
    Word,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    ActorId,
    Action,
    Detail,
    CreatedAt,
}
