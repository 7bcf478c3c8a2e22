use analytics_models::ViewTarget;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GetAnalyticsSummaryQuery;

/// Exact view count for a single project or blog post, unbounded by the
/// summary's top-10 cut.
#[derive(Debug, Clone, Copy)]
pub struct GetContentViewsQuery {
    pub target: ViewTarget,
}

/// Per-day view histogram over an inclusive date range.
#[derive(Debug, Clone, Copy)]
pub struct GetViewsByDateRangeQuery {
    pub target: ViewTarget,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetTopReferrersQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetTopCountriesQuery {
    pub limit: Option<u64>,
}
