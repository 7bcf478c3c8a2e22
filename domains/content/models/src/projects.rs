use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;
use uuid::Uuid;

/// A portfolio project as stored in the `projects` table.
///
/// Rows are soft-deleted: `deleted_at` is set instead of removing the row, so
/// view events referencing the project stay resolvable.
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
pub struct Project {
    #[builder(default)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default)]
    pub stack: Vec<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default)]
    pub github_url: Option<String>,
    #[builder(default)]
    pub live_url: Option<String>,
    #[builder(default)]
    pub featured: bool,
    #[builder(default)]
    pub sort_order: i32,
    #[builder(default)]
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub updated_at: DateTime<Utc>,
    #[builder(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a project row.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default)]
    pub stack: Vec<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default)]
    pub github_url: Option<String>,
    #[builder(default)]
    pub live_url: Option<String>,
    #[builder(default)]
    pub featured: bool,
    #[builder(default)]
    pub sort_order: i32,
}

/// Fully resolved replacement state for a project row. Partial-update
/// merging happens in the command handler, which folds the request into the
/// existing row before writing.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct UpdateProject {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub stack: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
}
