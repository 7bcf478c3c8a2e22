use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct GetProjectQuery {
    pub project_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListProjectsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Restrict the listing to featured projects.
    #[serde(default)]
    pub featured_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetBlogBySlugQuery {
    pub slug: String,
    /// Set for admin readers; unpublished posts stay hidden otherwise.
    #[serde(default)]
    pub allow_unpublished: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListBlogsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// When set only published posts are returned. Anonymous readers always
    /// get a published-only listing; admins may clear this to see drafts.
    #[serde(default)]
    pub published_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetSkillQuery {
    pub skill_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListSkillsQuery {
    /// Filter to one category; the unfiltered listing is grouped by category.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListContactsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(default)]
    pub unread_only: bool,
}
