#[cfg(test)]
mod tests {
    use crate::database::entity::post::{self, PostStatus};
    use crate::database::postgres_repo::{PostgresContentRepository, PostgresReportRepository};
    use palisade_core::domain::ContentStatus;
    use palisade_core::ports::{ContentRepository, ReportRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_post_by_id() {
        // Create mock database with expected query results
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                title: "Test Post".to_owned(),
                body: "Body".to_owned(),
                status: PostStatus::Pending,
                hide_reason: Some("Banned terms: spam".to_owned()),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresContentRepository::new(db);

        let result = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let item = result.unwrap();
        assert_eq!(item.id, post_id);
        assert_eq!(item.status, ContentStatus::Pending);
        assert_eq!(item.hide_reason.as_deref(), Some("Banned terms: spam"));
    }

    #[tokio::test]
    async fn test_report_count_query() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(7)]])
            .into_connection();

        let repo = PostgresReportRepository::new(db);

        let count = repo.count_for_post(post_id).await.unwrap();
        assert_eq!(count, 7);
    }

    fn count_row(n: i64) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        let mut row = std::collections::BTreeMap::new();
        row.insert("num_items", sea_orm::Value::BigInt(Some(n)));
        row
    }
}
