use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;
use uuid::Uuid;

/// A skill entry, grouped by `category` on the public listing. Skills are
/// hard-deleted; there is no tombstone column.
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
pub struct Skill {
    #[builder(default)]
    pub id: Uuid,
    pub category: String,
    pub name: String,
    #[builder(default)]
    pub icon_url: Option<String>,
    #[builder(default)]
    pub level: i32,
    #[builder(default)]
    pub sort_order: i32,
    #[builder(default)]
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct NewSkill {
    pub category: String,
    pub name: String,
    #[builder(default)]
    pub icon_url: Option<String>,
    #[builder(default)]
    pub level: i32,
    #[builder(default)]
    pub sort_order: i32,
}

/// Fully resolved replacement state; merged from the partial request by the
/// command handler.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct UpdateSkill {
    pub category: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub level: i32,
    pub sort_order: i32,
}
