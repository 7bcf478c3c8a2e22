use analytics_errors::AnalyticsError;
use analytics_models::{
    CountryCount, DailyViews, EntityViewCount, ReferrerCount, ViewEvent,
    ViewMetadata, ViewTarget,
};
use chrono::{DateTime, Utc};
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

/// How many entries the per-entity leaderboards return.
const TOP_CONTENT_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct ViewEventDao {
    db: SqlConnect,
}

impl ViewEventDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn map_row(&self, row: &tokio_postgres::Row) -> ViewEvent {
        ViewEvent {
            id: row.get("id"),
            project_id: row.get("project_id"),
            blog_id: row.get("blog_id"),
            ip_address: row.get("ip_address"),
            user_agent: row.get("user_agent"),
            referrer: row.get("referrer"),
            country: row.get("country"),
            city: row.get("city"),
            timestamp: row.get("timestamp"),
        }
    }

    /// Records one view against the targeted entity, stamped now.
    #[instrument(skip(self, metadata))]
    pub async fn record(
        &self, target: ViewTarget, metadata: ViewMetadata,
    ) -> Result<ViewEvent, AnalyticsError> {
        self.record_at(target, metadata, Utc::now()).await
    }

    /// Same as [`record`](Self::record) with an explicit timestamp, for
    /// backfills and fixtures.
    #[instrument(skip(self, metadata))]
    pub async fn record_at(
        &self, target: ViewTarget, metadata: ViewMetadata,
        timestamp: DateTime<Utc>,
    ) -> Result<ViewEvent, AnalyticsError> {
        let client = self.db.get_client().await?;
        let id = Uuid::now_v7();

        let stmt = client
            .prepare(
                "INSERT INTO view_events (id, project_id, blog_id, \
                 ip_address, user_agent, referrer, country, city, timestamp) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                 RETURNING id, project_id, blog_id, ip_address, user_agent, \
                 referrer, country, city, timestamp",
            )
            .await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &id,
                    &target.project_id(),
                    &target.blog_id(),
                    &metadata.ip_address,
                    &metadata.user_agent,
                    &metadata.referrer,
                    &metadata.country,
                    &metadata.city,
                    &timestamp,
                ],
            )
            .await?;

        Ok(self.map_row(&row))
    }

    /// Bumps the denormalized counter on the post row. A vanished row is
    /// not an error; the event log remains the source of truth.
    #[instrument(skip(self))]
    pub async fn increment_blog_views(
        &self, blog_id: Uuid,
    ) -> Result<(), AnalyticsError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare("UPDATE blogs SET views = views + 1 WHERE id = $1")
            .await?;
        client.execute(&stmt, &[&blog_id]).await?;

        Ok(())
    }

    /// Lifetime view count for one entity. Unknown ids simply count zero.
    #[instrument(skip(self))]
    pub async fn count_for(
        &self, target: ViewTarget,
    ) -> Result<i64, AnalyticsError> {
        let client = self.db.get_analytics_client().await?;

        let query = match target {
            ViewTarget::Project(_) => {
                "SELECT COUNT(*) FROM view_events WHERE project_id = $1"
            },
            ViewTarget::Blog(_) => {
                "SELECT COUNT(*) FROM view_events WHERE blog_id = $1"
            },
        };

        let stmt = client.prepare(query).await?;
        let row = client.query_one(&stmt, &[&target.id()]).await?;

        Ok(row.get(0))
    }

    #[instrument(skip(self))]
    pub async fn count_all(&self) -> Result<i64, AnalyticsError> {
        let client = self.db.get_analytics_client().await?;
        let row = client
            .query_one("SELECT COUNT(*) FROM view_events", &[])
            .await?;

        Ok(row.get(0))
    }

    /// The ten most-viewed projects, busiest first.
    #[instrument(skip(self))]
    pub async fn top_projects(
        &self,
    ) -> Result<Vec<EntityViewCount>, AnalyticsError> {
        let client = self.db.get_analytics_client().await?;
        let stmt = client
            .prepare(
                "SELECT project_id AS entity_id, COUNT(*) AS views \
                 FROM view_events WHERE project_id IS NOT NULL \
                 GROUP BY project_id ORDER BY views DESC LIMIT $1",
            )
            .await?;
        let rows = client.query(&stmt, &[&TOP_CONTENT_LIMIT]).await?;

        Ok(rows
            .iter()
            .map(|row| EntityViewCount {
                entity_id: row.get("entity_id"),
                views: row.get("views"),
            })
            .collect())
    }

    /// The ten most-viewed blog posts, busiest first.
    #[instrument(skip(self))]
    pub async fn top_blogs(
        &self,
    ) -> Result<Vec<EntityViewCount>, AnalyticsError> {
        let client = self.db.get_analytics_client().await?;
        let stmt = client
            .prepare(
                "SELECT blog_id AS entity_id, COUNT(*) AS views \
                 FROM view_events WHERE blog_id IS NOT NULL \
                 GROUP BY blog_id ORDER BY views DESC LIMIT $1",
            )
            .await?;
        let rows = client.query(&stmt, &[&TOP_CONTENT_LIMIT]).await?;

        Ok(rows
            .iter()
            .map(|row| EntityViewCount {
                entity_id: row.get("entity_id"),
                views: row.get("views"),
            })
            .collect())
    }

    /// Referrer leaderboard over all recorded views. Events without a
    /// referrer are left out rather than lumped into a bucket.
    #[instrument(skip(self))]
    pub async fn top_referrers(
        &self, limit: u64,
    ) -> Result<Vec<ReferrerCount>, AnalyticsError> {
        let client = self.db.get_analytics_client().await?;
        let stmt = client
            .prepare(
                "SELECT referrer, COUNT(*) AS count \
                 FROM view_events WHERE referrer IS NOT NULL \
                 GROUP BY referrer ORDER BY count DESC LIMIT $1",
            )
            .await?;
        let rows = client.query(&stmt, &[&(limit as i64)]).await?;

        Ok(rows
            .iter()
            .map(|row| ReferrerCount {
                referrer: row.get("referrer"),
                count: row.get("count"),
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn top_countries(
        &self, limit: u64,
    ) -> Result<Vec<CountryCount>, AnalyticsError> {
        let client = self.db.get_analytics_client().await?;
        let stmt = client
            .prepare(
                "SELECT country, COUNT(*) AS count \
                 FROM view_events WHERE country IS NOT NULL \
                 GROUP BY country ORDER BY count DESC LIMIT $1",
            )
            .await?;
        let rows = client.query(&stmt, &[&(limit as i64)]).await?;

        Ok(rows
            .iter()
            .map(|row| CountryCount {
                country: row.get("country"),
                count: row.get("count"),
            })
            .collect())
    }

    /// Per-day view counts for one entity over `[from, until)`. Days with
    /// no views produce no row. Buckets follow the UTC calendar.
    #[instrument(skip(self))]
    pub async fn views_by_day(
        &self, target: ViewTarget, from: DateTime<Utc>, until: DateTime<Utc>,
    ) -> Result<Vec<DailyViews>, AnalyticsError> {
        let client = self.db.get_analytics_client().await?;

        let query = match target {
            ViewTarget::Project(_) => {
                "SELECT (timestamp AT TIME ZONE 'UTC')::date AS day, \
                 COUNT(*) AS views \
                 FROM view_events \
                 WHERE project_id = $1 AND timestamp >= $2 AND \
                 timestamp < $3 \
                 GROUP BY day ORDER BY day ASC"
            },
            ViewTarget::Blog(_) => {
                "SELECT (timestamp AT TIME ZONE 'UTC')::date AS day, \
                 COUNT(*) AS views \
                 FROM view_events \
                 WHERE blog_id = $1 AND timestamp >= $2 AND timestamp < $3 \
                 GROUP BY day ORDER BY day ASC"
            },
        };

        let stmt = client.prepare(query).await?;
        let rows = client
            .query(&stmt, &[&target.id(), &from, &until])
            .await?;

        Ok(rows
            .iter()
            .map(|row| DailyViews {
                date: row.get("day"),
                views: row.get("views"),
            })
            .collect())
    }

    /// Titles for the given project ids, soft-deleted rows excluded.
    #[instrument(skip(self, ids))]
    pub async fn project_titles(
        &self, ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, AnalyticsError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title FROM projects \
                 WHERE id = ANY($1) AND deleted_at IS NULL",
            )
            .await?;
        let rows = client.query(&stmt, &[&ids]).await?;

        Ok(rows
            .iter()
            .map(|row| (row.get("id"), row.get("title")))
            .collect())
    }

    /// Titles for the given blog ids, soft-deleted rows excluded.
    #[instrument(skip(self, ids))]
    pub async fn blog_titles(
        &self, ids: &[Uuid],
    ) -> Result<Vec<(Uuid, String)>, AnalyticsError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title FROM blogs \
                 WHERE id = ANY($1) AND deleted_at IS NULL",
            )
            .await?;
        let rows = client.query(&stmt, &[&ids]).await?;

        Ok(rows
            .iter()
            .map(|row| (row.get("id"), row.get("title")))
            .collect())
    }

    /// Drops every event older than the cutoff and reports how many went.
    #[instrument(skip(self))]
    pub async fn delete_before(
        &self, before: DateTime<Utc>,
    ) -> Result<u64, AnalyticsError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare("DELETE FROM view_events WHERE timestamp < $1")
            .await?;
        let affected = client.execute(&stmt, &[&before]).await?;

        Ok(affected)
    }
}
