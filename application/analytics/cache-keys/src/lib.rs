use std::time::Duration;

use analytics_responses::AnalyticsSummaryResponse;
use redis_connection::cache_key;

cache_key!(AnalyticsSummaryCacheKey::<AnalyticsSummaryResponse> => "analytics:summary");

/// Kept short; the summary fronts a full scan of the view-event log.
pub const SUMMARY_CACHE_TTL: Duration = Duration::from_secs(300);
