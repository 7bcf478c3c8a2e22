pub mod retention;

use admin_auth::{AdminToken, AdminUser};
use analytics_command_handlers::CleanupViewEventsHandler;
use analytics_commands::CleanupViewEventsCommand;
use analytics_models::{CountryCount, DailyViews, ReferrerCount, ViewTarget};
use analytics_queries::{
    GetAnalyticsSummaryQuery, GetContentViewsQuery, GetTopCountriesQuery,
    GetTopReferrersQuery, GetViewsByDateRangeQuery,
};
use analytics_query_handlers::{
    GetAnalyticsSummaryHandler, GetContentViewsHandler, GetTopCountriesHandler,
    GetTopReferrersHandler, GetViewsByDateRangeHandler,
};
use analytics_responses::{
    AnalyticsSummaryResponse, CleanupViewEventsResponse, ViewCountResponse,
};
use axum::{
    Router,
    extract::{FromRef, Path, Query, State},
    response::Json,
    routing::{delete, get},
};
use chrono::NaiveDate;
use common_errors::{ApiResponse, AppError};
use redis_connection::CacheConnect;
use serde::Deserialize;
use sql_connection::SqlConnect;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::retention::RetentionScheduler;

/// Events older than this many days are swept when no explicit window is
/// given, by the cleanup endpoint and the daily retention job alike.
pub const DEFAULT_RETENTION_DAYS: u32 = 90;

/// Handler bundle behind the analytics routes. Every route requires the
/// admin bearer token.
#[derive(Clone)]
pub struct AnalyticsServices {
    pub summary: GetAnalyticsSummaryHandler,
    pub content_views: GetContentViewsHandler,
    pub views_by_date_range: GetViewsByDateRangeHandler,
    pub top_referrers: GetTopReferrersHandler,
    pub top_countries: GetTopCountriesHandler,
    pub cleanup: CleanupViewEventsHandler,
    pub retention: RetentionScheduler,
    pub admin_token: AdminToken,
}

impl AnalyticsServices {
    pub fn new(
        db: SqlConnect, cache: CacheConnect, admin_token: AdminToken,
    ) -> Self {
        Self {
            summary: GetAnalyticsSummaryHandler::new(db.clone(), cache),
            content_views: GetContentViewsHandler::new(db.clone()),
            views_by_date_range: GetViewsByDateRangeHandler::new(db.clone()),
            top_referrers: GetTopReferrersHandler::new(db.clone()),
            top_countries: GetTopCountriesHandler::new(db.clone()),
            cleanup: CleanupViewEventsHandler::new(db.clone()),
            retention: RetentionScheduler::new(db),
            admin_token,
        }
    }
}

impl FromRef<AnalyticsServices> for AdminToken {
    fn from_ref(services: &AnalyticsServices) -> Self {
        services.admin_token.clone()
    }
}

pub struct AnalyticsHandlers;

impl AnalyticsHandlers {
    pub fn routes() -> Router<AnalyticsServices> {
        Router::new()
            .route("/summary", get(get_summary))
            .route("/referrers", get(get_top_referrers))
            .route("/countries", get(get_top_countries))
            .route("/cleanup", delete(cleanup_view_events))
            .route("/{kind}/{id}/views", get(get_content_views))
            .route("/{kind}/{id}/date-range", get(get_views_by_date_range))
    }
}

fn parse_target(kind: &str, id: Uuid) -> Result<ViewTarget, AppError> {
    ViewTarget::from_kind(kind, id).ok_or_else(|| {
        AppError::bad_request(
            "INVALID_ENTITY_TYPE",
            "Entity type must be 'project' or 'blog'",
        )
    })
}

fn parse_date(value: Option<&str>) -> Result<NaiveDate, AppError> {
    value
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            AppError::bad_request(
                "INVALID_DATE_RANGE",
                "startDate and endDate must be YYYY-MM-DD dates",
            )
        })
}

#[utoipa::path(
    get,
    path = "/analytics/summary",
    responses(
        (status = 200, description = "Rollup over the whole view-event log", body = AnalyticsSummaryResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "analytics"
)]
#[instrument(skip_all)]
pub async fn get_summary(
    _admin: AdminUser, State(services): State<AnalyticsServices>,
) -> Result<Json<ApiResponse<AnalyticsSummaryResponse>>, AppError> {
    let summary = services.summary.execute(GetAnalyticsSummaryQuery).await?;
    Ok(Json(ApiResponse::new(summary)))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct LeaderboardParams {
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/analytics/referrers",
    params(
        LeaderboardParams
    ),
    responses(
        (status = 200, description = "Most frequent referrers, descending", body = Vec<ReferrerCount>),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "analytics"
)]
#[instrument(skip_all)]
pub async fn get_top_referrers(
    _admin: AdminUser, State(services): State<AnalyticsServices>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<ApiResponse<Vec<ReferrerCount>>>, AppError> {
    let referrers = services
        .top_referrers
        .execute(GetTopReferrersQuery {
            limit: params.limit,
        })
        .await?;
    Ok(Json(ApiResponse::new(referrers)))
}

#[utoipa::path(
    get,
    path = "/analytics/countries",
    params(
        LeaderboardParams
    ),
    responses(
        (status = 200, description = "Most frequent visitor countries, descending", body = Vec<CountryCount>),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "analytics"
)]
#[instrument(skip_all)]
pub async fn get_top_countries(
    _admin: AdminUser, State(services): State<AnalyticsServices>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<ApiResponse<Vec<CountryCount>>>, AppError> {
    let countries = services
        .top_countries
        .execute(GetTopCountriesQuery {
            limit: params.limit,
        })
        .await?;
    Ok(Json(ApiResponse::new(countries)))
}

#[utoipa::path(
    get,
    path = "/analytics/{kind}/{id}/views",
    params(
        ("kind" = String, Path, description = "Entity type, 'project' or 'blog'"),
        ("id" = Uuid, Path, description = "Entity ID")
    ),
    responses(
        (status = 200, description = "Exact view count for the entity", body = ViewCountResponse),
        (status = 400, description = "Invalid entity type", body = common_errors::ApiErrorResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "analytics"
)]
#[instrument(skip_all)]
pub async fn get_content_views(
    _admin: AdminUser, State(services): State<AnalyticsServices>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<ViewCountResponse>>, AppError> {
    let target = parse_target(&kind, id)?;
    let views = services
        .content_views
        .execute(GetContentViewsQuery { target })
        .await?;
    Ok(Json(ApiResponse::new(views)))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    /// Inclusive range start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive range end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/analytics/{kind}/{id}/date-range",
    params(
        ("kind" = String, Path, description = "Entity type, 'project' or 'blog'"),
        ("id" = Uuid, Path, description = "Entity ID"),
        DateRangeParams
    ),
    responses(
        (status = 200, description = "Per-day views within the range; zero-view days are omitted", body = Vec<DailyViews>),
        (status = 400, description = "Invalid entity type or dates", body = common_errors::ApiErrorResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "analytics"
)]
#[instrument(skip_all)]
pub async fn get_views_by_date_range(
    _admin: AdminUser, State(services): State<AnalyticsServices>,
    Path((kind, id)): Path<(String, Uuid)>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<ApiResponse<Vec<DailyViews>>>, AppError> {
    let target = parse_target(&kind, id)?;
    let start = parse_date(params.start_date.as_deref())?;
    let end = parse_date(params.end_date.as_deref())?;

    let series = services
        .views_by_date_range
        .execute(GetViewsByDateRangeQuery { target, start, end })
        .await?;
    Ok(Json(ApiResponse::new(series)))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CleanupParams {
    /// Retention window in days; events older than this are deleted.
    pub days: Option<u32>,
}

#[utoipa::path(
    delete,
    path = "/analytics/cleanup",
    params(
        CleanupParams
    ),
    responses(
        (status = 200, description = "Retention sweep completed", body = CleanupViewEventsResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "analytics"
)]
#[instrument(skip_all)]
pub async fn cleanup_view_events(
    _admin: AdminUser, State(services): State<AnalyticsServices>,
    Query(params): Query<CleanupParams>,
) -> Result<Json<ApiResponse<CleanupViewEventsResponse>>, AppError> {
    let command = CleanupViewEventsCommand {
        days_to_keep: params.days.unwrap_or(DEFAULT_RETENTION_DAYS),
    };
    let result = services.cleanup.execute(command).await?;
    Ok(Json(ApiResponse::new(result)))
}
