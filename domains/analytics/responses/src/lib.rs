use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of a top-10 ranking, with the title resolved from the content
/// tables at aggregation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopContentEntry {
    pub id: Uuid,
    pub title: String,
    pub views: i64,
}

/// Snapshot rollup over the whole view-event log.
///
/// `project_views` and `blog_views` sum the ranked top-10 groups only;
/// `total_views` is the figure that covers the entire log.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummaryResponse {
    pub top_projects: Vec<TopContentEntry>,
    pub top_blogs: Vec<TopContentEntry>,
    pub total_views: i64,
    pub project_views: i64,
    pub blog_views: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ViewCountResponse {
    pub id: Uuid,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupViewEventsResponse {
    pub deleted_count: u64,
    pub deleted_before: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_with_camel_case_keys() {
        let summary = AnalyticsSummaryResponse {
            top_projects: vec![TopContentEntry {
                id: Uuid::now_v7(),
                title: "Atelier".into(),
                views: 3,
            }],
            top_blogs: vec![],
            total_views: 4,
            project_views: 3,
            blog_views: 1,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("topProjects").is_some());
        assert!(json.get("totalViews").is_some());
        assert!(json.get("projectViews").is_some());
        assert!(json.get("top_projects").is_none());
    }
}
