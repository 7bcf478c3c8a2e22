use std::collections::HashMap;

use analytics_cache_keys::{AnalyticsSummaryCacheKey, SUMMARY_CACHE_TTL};
use analytics_dao::ViewEventDao;
use analytics_errors::AnalyticsError;
use analytics_models::{
    CountryCount, DailyViews, EntityViewCount, ReferrerCount,
};
use analytics_queries::{
    GetAnalyticsSummaryQuery, GetContentViewsQuery, GetTopCountriesQuery,
    GetTopReferrersQuery, GetViewsByDateRangeQuery,
};
use analytics_responses::{
    AnalyticsSummaryResponse, TopContentEntry, ViewCountResponse,
};
use chrono::{DateTime, Days, NaiveTime, Utc};
use redis_connection::{CacheBind, CacheConnect};
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

/// Fallback for the referrer and country leaderboards when the request
/// leaves the limit out.
const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;

/// Attaches titles to ranked view counts, preserving rank order. Entries
/// whose entity no longer exists are dropped from the ranking; the counts
/// already summed elsewhere are unaffected.
fn resolve_titles(
    ranked: Vec<EntityViewCount>, titles: Vec<(Uuid, String)>,
) -> Vec<TopContentEntry> {
    let titles: HashMap<Uuid, String> = titles.into_iter().collect();

    ranked
        .into_iter()
        .filter_map(|entry| {
            titles.get(&entry.entity_id).map(|title| {
                TopContentEntry {
                    id: entry.entity_id,
                    title: title.clone(),
                    views: entry.views,
                }
            })
        })
        .collect()
}

#[derive(Clone)]
pub struct GetAnalyticsSummaryHandler {
    view_event_dao: ViewEventDao,
    cache: CacheConnect,
}

impl GetAnalyticsSummaryHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            view_event_dao: ViewEventDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, _query: GetAnalyticsSummaryQuery,
    ) -> Result<AnalyticsSummaryResponse, AnalyticsError> {
        let entry = AnalyticsSummaryCacheKey.bind(&self.cache);

        if let Some(summary) = entry.try_get().await {
            tracing::debug!("Cache hit for analytics summary");
            return Ok(summary);
        }

        let top_projects = self.view_event_dao.top_projects().await?;
        let top_blogs = self.view_event_dao.top_blogs().await?;
        let total_views = self.view_event_dao.count_all().await?;

        // Summed over the ranked groups before title resolution, so a
        // since-removed entity still counts here.
        let project_views: i64 =
            top_projects.iter().map(|entry| entry.views).sum();
        let blog_views: i64 = top_blogs.iter().map(|entry| entry.views).sum();

        let project_ids: Vec<Uuid> =
            top_projects.iter().map(|entry| entry.entity_id).collect();
        let blog_ids: Vec<Uuid> =
            top_blogs.iter().map(|entry| entry.entity_id).collect();

        let project_titles =
            self.view_event_dao.project_titles(&project_ids).await?;
        let blog_titles = self.view_event_dao.blog_titles(&blog_ids).await?;

        let summary = AnalyticsSummaryResponse {
            top_projects: resolve_titles(top_projects, project_titles),
            top_blogs: resolve_titles(top_blogs, blog_titles),
            total_views,
            project_views,
            blog_views,
        };
        entry.set_with_expire(&summary, SUMMARY_CACHE_TTL).await;

        Ok(summary)
    }
}

#[derive(Clone)]
pub struct GetContentViewsHandler {
    view_event_dao: ViewEventDao,
}

impl GetContentViewsHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            view_event_dao: ViewEventDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetContentViewsQuery,
    ) -> Result<ViewCountResponse, AnalyticsError> {
        let views = self.view_event_dao.count_for(query.target).await?;

        Ok(ViewCountResponse {
            id: query.target.id(),
            views,
        })
    }
}

#[derive(Clone)]
pub struct GetViewsByDateRangeHandler {
    view_event_dao: ViewEventDao,
}

impl GetViewsByDateRangeHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            view_event_dao: ViewEventDao::new(db),
        }
    }

    /// Buckets views per UTC calendar day over the inclusive date range.
    /// Days without a single view carry no entry. An inverted range is
    /// simply empty.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetViewsByDateRangeQuery,
    ) -> Result<Vec<DailyViews>, AnalyticsError> {
        if query.start > query.end {
            return Ok(Vec::new());
        }

        let from = query.start.and_time(NaiveTime::MIN).and_utc();
        let until = match query.end.checked_add_days(Days::new(1)) {
            Some(next) => next.and_time(NaiveTime::MIN).and_utc(),
            None => DateTime::<Utc>::MAX_UTC,
        };

        self.view_event_dao
            .views_by_day(query.target, from, until)
            .await
    }
}

#[derive(Clone)]
pub struct GetTopReferrersHandler {
    view_event_dao: ViewEventDao,
}

impl GetTopReferrersHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            view_event_dao: ViewEventDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetTopReferrersQuery,
    ) -> Result<Vec<ReferrerCount>, AnalyticsError> {
        self.view_event_dao
            .top_referrers(query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT))
            .await
    }
}

#[derive(Clone)]
pub struct GetTopCountriesHandler {
    view_event_dao: ViewEventDao,
}

impl GetTopCountriesHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            view_event_dao: ViewEventDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetTopCountriesQuery,
    ) -> Result<Vec<CountryCount>, AnalyticsError> {
        self.view_event_dao
            .top_countries(query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT))
            .await
    }
}

#[cfg(test)]
mod tests {
    use analytics_command_handlers::TrackViewHandler;
    use analytics_commands::TrackViewCommand;
    use analytics_models::{ViewMetadata, ViewTarget};
    use chrono::{Duration, NaiveDate};
    use test_utils::*;

    use super::*;

    struct Harness {
        container: TestPostgresContainer,
        _redis: TestRedisContainer,
        track: TrackViewHandler,
        summary: GetAnalyticsSummaryHandler,
        views: GetContentViewsHandler,
        by_day: GetViewsByDateRangeHandler,
        referrers: GetTopReferrersHandler,
        countries: GetTopCountriesHandler,
    }

    async fn setup() -> anyhow::Result<Harness> {
        let container = TestPostgresContainer::new().await?;
        let redis = TestRedisContainer::new().await?;
        let db = create_sql_connect(&container);
        let cache = create_cache_connect(&redis);

        Ok(Harness {
            track: TrackViewHandler::new(db.clone()),
            summary: GetAnalyticsSummaryHandler::new(db.clone(), cache),
            views: GetContentViewsHandler::new(db.clone()),
            by_day: GetViewsByDateRangeHandler::new(db.clone()),
            referrers: GetTopReferrersHandler::new(db.clone()),
            countries: GetTopCountriesHandler::new(db),
            container,
            _redis: redis,
        })
    }

    fn meta(country: Option<&str>, referrer: Option<&str>) -> ViewMetadata {
        ViewMetadata {
            country: country.map(str::to_string),
            referrer: referrer.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn counts_and_leaderboards_reflect_tracked_views() {
        let harness = setup().await.unwrap();
        let project_id =
            create_test_project(&harness.container, "Proj", false)
                .await
                .unwrap();
        let blog_id =
            create_test_blog(&harness.container, "Post", "post", true)
                .await
                .unwrap();

        for _ in 0..3 {
            harness
                .track
                .execute(TrackViewCommand {
                    target: ViewTarget::Project(project_id),
                    metadata: meta(Some("US"), Some("https://news.site")),
                })
                .await
                .unwrap();
        }
        harness
            .track
            .execute(TrackViewCommand {
                target: ViewTarget::Blog(blog_id),
                metadata: meta(Some("FR"), None),
            })
            .await
            .unwrap();

        let project_views = harness
            .views
            .execute(GetContentViewsQuery {
                target: ViewTarget::Project(project_id),
            })
            .await
            .unwrap();
        assert_eq!(project_views.views, 3);
        assert_eq!(project_views.id, project_id);

        let countries = harness
            .countries
            .execute(GetTopCountriesQuery { limit: Some(2) })
            .await
            .unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].country, "US");
        assert_eq!(countries[0].count, 3);
        assert_eq!(countries[1].country, "FR");
        assert_eq!(countries[1].count, 1);

        // The blog view had no referrer; only the project views count here.
        let referrers = harness
            .referrers
            .execute(GetTopReferrersQuery { limit: None })
            .await
            .unwrap();
        assert_eq!(referrers.len(), 1);
        assert_eq!(referrers[0].referrer, "https://news.site");
        assert_eq!(referrers[0].count, 3);
    }

    #[tokio::test]
    async fn unknown_ids_count_zero_views() {
        let harness = setup().await.unwrap();

        let result = harness
            .views
            .execute(GetContentViewsQuery {
                target: ViewTarget::Blog(Uuid::now_v7()),
            })
            .await
            .unwrap();
        assert_eq!(result.views, 0);
    }

    #[tokio::test]
    async fn summary_ranks_content_and_sums_views() {
        let harness = setup().await.unwrap();
        let busy = create_test_project(&harness.container, "Busy", false)
            .await
            .unwrap();
        let quiet = create_test_project(&harness.container, "Quiet", false)
            .await
            .unwrap();
        let blog_id =
            create_test_blog(&harness.container, "Post", "post", true)
                .await
                .unwrap();

        for _ in 0..3 {
            harness
                .track
                .execute(TrackViewCommand {
                    target: ViewTarget::Project(busy),
                    metadata: ViewMetadata::default(),
                })
                .await
                .unwrap();
        }
        harness
            .track
            .execute(TrackViewCommand {
                target: ViewTarget::Project(quiet),
                metadata: ViewMetadata::default(),
            })
            .await
            .unwrap();
        harness
            .track
            .execute(TrackViewCommand {
                target: ViewTarget::Blog(blog_id),
                metadata: ViewMetadata::default(),
            })
            .await
            .unwrap();

        let summary = harness
            .summary
            .execute(GetAnalyticsSummaryQuery)
            .await
            .unwrap();

        assert_eq!(summary.total_views, 5);
        assert_eq!(summary.project_views, 4);
        assert_eq!(summary.blog_views, 1);
        assert_eq!(summary.top_projects.len(), 2);
        assert_eq!(summary.top_projects[0].title, "Busy");
        assert_eq!(summary.top_projects[0].views, 3);
        assert_eq!(summary.top_projects[1].title, "Quiet");
        assert_eq!(summary.top_blogs.len(), 1);
    }

    #[tokio::test]
    async fn summary_drops_soft_deleted_entities_but_keeps_their_views() {
        let harness = setup().await.unwrap();
        let kept = create_test_project(&harness.container, "Kept", false)
            .await
            .unwrap();
        let doomed = create_test_project(&harness.container, "Doomed", false)
            .await
            .unwrap();

        for _ in 0..2 {
            harness
                .track
                .execute(TrackViewCommand {
                    target: ViewTarget::Project(doomed),
                    metadata: ViewMetadata::default(),
                })
                .await
                .unwrap();
        }
        harness
            .track
            .execute(TrackViewCommand {
                target: ViewTarget::Project(kept),
                metadata: ViewMetadata::default(),
            })
            .await
            .unwrap();

        let client = harness.container.client().await.unwrap();
        client
            .execute(
                "UPDATE projects SET deleted_at = NOW() WHERE id = $1",
                &[&doomed],
            )
            .await
            .unwrap();

        let summary = harness
            .summary
            .execute(GetAnalyticsSummaryQuery)
            .await
            .unwrap();

        let titles: Vec<&str> = summary
            .top_projects
            .iter()
            .map(|entry| entry.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Kept"]);
        // The deleted project's events still contribute to the sums.
        assert_eq!(summary.project_views, 3);
        assert_eq!(summary.total_views, 3);
    }

    #[tokio::test]
    async fn date_range_buckets_by_utc_day_and_skips_empty_days() {
        let harness = setup().await.unwrap();
        let project_id =
            create_test_project(&harness.container, "Proj", false)
                .await
                .unwrap();

        let day_one = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let day_three = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

        let noon = |date: NaiveDate| {
            date.and_hms_opt(12, 0, 0).unwrap().and_utc()
        };
        for ts in [
            noon(day_one),
            noon(day_one) + Duration::hours(3),
            noon(day_three),
        ] {
            create_test_view_event(
                &harness.container,
                Some(project_id),
                None,
                None,
                None,
                ts,
            )
            .await
            .unwrap();
        }

        let buckets = harness
            .by_day
            .execute(GetViewsByDateRangeQuery {
                target: ViewTarget::Project(project_id),
                start: day_one,
                end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, day_one);
        assert_eq!(buckets[0].views, 2);
        assert_eq!(buckets[1].date, day_three);
        assert_eq!(buckets[1].views, 1);
    }

    #[tokio::test]
    async fn inverted_date_range_is_empty() {
        let harness = setup().await.unwrap();
        let project_id =
            create_test_project(&harness.container, "Proj", false)
                .await
                .unwrap();

        let buckets = harness
            .by_day
            .execute(GetViewsByDateRangeQuery {
                target: ViewTarget::Project(project_id),
                start: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            })
            .await
            .unwrap();

        assert!(buckets.is_empty());
    }
}
