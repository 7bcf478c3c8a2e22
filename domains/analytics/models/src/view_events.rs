use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;
use uuid::Uuid;

/// The entity a page view belongs to. A view event references exactly one
/// project or one blog post, never both; the enum makes the invalid state
/// unrepresentable above the storage layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewTarget {
    Project(Uuid),
    Blog(Uuid),
}

impl ViewTarget {
    /// Builds a target from the `{type}` segment of an analytics route.
    /// Returns `None` for anything other than `project` or `blog`.
    pub fn from_kind(kind: &str, id: Uuid) -> Option<Self> {
        match kind {
            "project" => Some(Self::Project(id)),
            "blog" => Some(Self::Blog(id)),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::Blog(_) => "blog",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Project(id) | Self::Blog(id) => *id,
        }
    }

    pub fn project_id(&self) -> Option<Uuid> {
        match self {
            Self::Project(id) => Some(*id),
            Self::Blog(_) => None,
        }
    }

    pub fn blog_id(&self) -> Option<Uuid> {
        match self {
            Self::Blog(id) => Some(*id),
            Self::Project(_) => None,
        }
    }
}

/// Request metadata captured alongside a view. Every field is best-effort;
/// a view with no metadata at all is still recorded.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TypedBuilder,
    ToSchema,
)]
pub struct ViewMetadata {
    #[builder(default)]
    pub ip_address: Option<String>,
    #[builder(default)]
    pub user_agent: Option<String>,
    #[builder(default)]
    pub referrer: Option<String>,
    #[builder(default)]
    pub country: Option<String>,
    #[builder(default)]
    pub city: Option<String>,
}

/// One recorded page view, as stored in the `view_events` table. Rows are
/// append-only; the retention sweep is the only deletion path.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TypedBuilder,
    ToSchema,
)]
pub struct ViewEvent {
    #[builder(default)]
    pub id: Uuid,
    #[builder(default)]
    pub project_id: Option<Uuid>,
    #[builder(default)]
    pub blog_id: Option<Uuid>,
    #[builder(default)]
    pub ip_address: Option<String>,
    #[builder(default)]
    pub user_agent: Option<String>,
    #[builder(default)]
    pub referrer: Option<String>,
    #[builder(default)]
    pub country: Option<String>,
    #[builder(default)]
    pub city: Option<String>,
    #[builder(default)]
    pub timestamp: DateTime<Utc>,
}

/// Per-entity view count straight out of a `GROUP BY`, before titles are
/// resolved against the content tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityViewCount {
    pub entity_id: Uuid,
    pub views: i64,
}

/// One day of views within a date-range histogram. Days without views are
/// omitted from the series, not zero-filled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReferrerCount {
    pub referrer: String,
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_kind_round_trips() {
        let id = Uuid::now_v7();
        let target = ViewTarget::from_kind("project", id).unwrap();
        assert_eq!(target, ViewTarget::Project(id));
        assert_eq!(target.kind(), "project");
        assert_eq!(target.project_id(), Some(id));
        assert_eq!(target.blog_id(), None);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(ViewTarget::from_kind("page", Uuid::now_v7()), None);
    }
}
