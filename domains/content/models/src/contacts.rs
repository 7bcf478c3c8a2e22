use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;
use uuid::Uuid;

/// An inbound contact-form message. Messages are append-only except for the
/// `read` flag, and are hard-deleted when dismissed from the inbox.
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
pub struct ContactMessage {
    #[builder(default)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    #[builder(default)]
    pub read: bool,
    #[builder(default)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}
