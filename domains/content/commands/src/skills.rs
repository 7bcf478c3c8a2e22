use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillCommand {
    pub category: String,
    pub name: String,
    pub icon_url: Option<String>,
    #[serde(default)]
    pub level: i32,
    #[serde(default, rename = "order")]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkillCommand {
    pub category: Option<String>,
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub level: Option<i32>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteSkillCommand {
    pub skill_id: Uuid,
}
