use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;
use uuid::Uuid;

/// A blog post as stored in the `blogs` table.
///
/// `views` is a denormalized counter bumped by the view recorder; the
/// authoritative per-post count lives in the view-event log.
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
pub struct Blog {
    #[builder(default)]
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[builder(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default)]
    pub published: bool,
    #[builder(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[builder(default)]
    pub read_time: Option<i32>,
    #[builder(default)]
    pub views: i32,
    #[builder(default)]
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub updated_at: DateTime<Utc>,
    #[builder(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Projection of [`Blog`] used by list endpoints. The full `content` body and
/// the view counter are not part of list payloads.
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
pub struct BlogListItem {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[builder(default)]
    pub excerpt: Option<String>,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default)]
    pub published: bool,
    #[builder(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[builder(default)]
    pub read_time: Option<i32>,
    #[builder(default)]
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a blog row. The slug, read time and publication
/// timestamp arrive here already resolved.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct NewBlog {
    pub title: String,
    pub slug: String,
    #[builder(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default)]
    pub published: bool,
    #[builder(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[builder(default)]
    pub read_time: Option<i32>,
}

/// Fully resolved replacement state for a blog row; the command handler
/// merges the partial request into the existing row first.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct UpdateBlog {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub read_time: Option<i32>,
}
