use analytics_models::{ViewMetadata, ViewTarget};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Records one page view. Issued by the content detail endpoints as a
/// detached task; the HTTP response never waits for it.
#[derive(Debug, Clone)]
pub struct TrackViewCommand {
    pub target: ViewTarget,
    pub metadata: ViewMetadata,
}

/// Retention sweep over the view-event log.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CleanupViewEventsCommand {
    /// Events older than this many days are deleted.
    pub days_to_keep: u32,
}
