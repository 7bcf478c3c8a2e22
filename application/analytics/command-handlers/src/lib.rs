use analytics_commands::{CleanupViewEventsCommand, TrackViewCommand};
use analytics_dao::ViewEventDao;
use analytics_errors::AnalyticsError;
use analytics_models::ViewTarget;
use analytics_responses::CleanupViewEventsResponse;
use chrono::{DateTime, Utc};
use sql_connection::SqlConnect;
use tracing::instrument;

/// Appends a view event and keeps the blog post's denormalized counter in
/// step. Callers run this on a detached task; a lost view is only a log
/// line, never a failed page load.
#[derive(Clone)]
pub struct TrackViewHandler {
    view_event_dao: ViewEventDao,
}

impl TrackViewHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            view_event_dao: ViewEventDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: TrackViewCommand,
    ) -> Result<(), AnalyticsError> {
        self.view_event_dao
            .record(command.target, command.metadata)
            .await?;

        if let ViewTarget::Blog(blog_id) = command.target {
            self.view_event_dao.increment_blog_views(blog_id).await?;
        }

        Ok(())
    }
}

/// Deletes view events older than the retention window. Safe to run
/// repeatedly; a second pass over the same window deletes nothing.
#[derive(Clone)]
pub struct CleanupViewEventsHandler {
    view_event_dao: ViewEventDao,
}

impl CleanupViewEventsHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            view_event_dao: ViewEventDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CleanupViewEventsCommand,
    ) -> Result<CleanupViewEventsResponse, AnalyticsError> {
        let cutoff = Utc::now()
            .checked_sub_signed(chrono::Duration::days(
                command.days_to_keep as i64,
            ))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let deleted_count =
            self.view_event_dao.delete_before(cutoff).await?;

        tracing::info!(
            deleted = deleted_count,
            cutoff = %cutoff,
            "View event retention sweep finished"
        );

        Ok(CleanupViewEventsResponse {
            deleted_count,
            deleted_before: cutoff,
        })
    }
}

#[cfg(test)]
mod tests {
    use analytics_models::ViewMetadata;
    use chrono::Duration;
    use test_utils::*;

    use super::*;

    async fn setup() -> anyhow::Result<(
        TestPostgresContainer,
        TrackViewHandler,
        CleanupViewEventsHandler,
    )> {
        let container = TestPostgresContainer::new().await?;
        let db = create_sql_connect(&container);

        Ok((
            container,
            TrackViewHandler::new(db.clone()),
            CleanupViewEventsHandler::new(db),
        ))
    }

    #[tokio::test]
    async fn tracking_a_blog_view_bumps_its_counter() {
        let (container, track, _) = setup().await.unwrap();
        let blog_id = create_test_blog(&container, "Post", "post", true)
            .await
            .unwrap();

        for _ in 0..2 {
            track
                .execute(TrackViewCommand {
                    target: ViewTarget::Blog(blog_id),
                    metadata: ViewMetadata::default(),
                })
                .await
                .unwrap();
        }

        let client = container.client().await.unwrap();
        let row = client
            .query_one("SELECT views FROM blogs WHERE id = $1", &[&blog_id])
            .await
            .unwrap();
        let views: i32 = row.get(0);
        assert_eq!(views, 2);

        let count = client
            .query_one(
                "SELECT COUNT(*) FROM view_events WHERE blog_id = $1",
                &[&blog_id],
            )
            .await
            .unwrap();
        let events: i64 = count.get(0);
        assert_eq!(events, 2);
    }

    #[tokio::test]
    async fn tracking_a_project_view_records_an_event_only() {
        let (container, track, _) = setup().await.unwrap();
        let project_id =
            create_test_project(&container, "Proj", false).await.unwrap();

        track
            .execute(TrackViewCommand {
                target: ViewTarget::Project(project_id),
                metadata: ViewMetadata {
                    country: Some("US".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        let client = container.client().await.unwrap();
        let row = client
            .query_one(
                "SELECT COUNT(*) FROM view_events WHERE project_id = $1",
                &[&project_id],
            )
            .await
            .unwrap();
        let events: i64 = row.get(0);
        assert_eq!(events, 1);
    }

    #[tokio::test]
    async fn tracking_rejects_unknown_targets() {
        let (_container, track, _) = setup().await.unwrap();

        let result = track
            .execute(TrackViewCommand {
                target: ViewTarget::Project(uuid::Uuid::now_v7()),
                metadata: ViewMetadata::default(),
            })
            .await;

        assert!(matches!(result, Err(AnalyticsError::Database(_))));
    }

    #[tokio::test]
    async fn cleanup_removes_only_expired_events_and_is_idempotent() {
        let (container, _, cleanup) = setup().await.unwrap();
        let project_id =
            create_test_project(&container, "Proj", false).await.unwrap();

        let now = Utc::now();
        create_test_view_event(
            &container,
            Some(project_id),
            None,
            None,
            None,
            now - Duration::days(120),
        )
        .await
        .unwrap();
        create_test_view_event(
            &container,
            Some(project_id),
            None,
            None,
            None,
            now - Duration::days(5),
        )
        .await
        .unwrap();

        let first = cleanup
            .execute(CleanupViewEventsCommand { days_to_keep: 90 })
            .await
            .unwrap();
        assert_eq!(first.deleted_count, 1);

        let second = cleanup
            .execute(CleanupViewEventsCommand { days_to_keep: 90 })
            .await
            .unwrap();
        assert_eq!(second.deleted_count, 0);
    }
}
