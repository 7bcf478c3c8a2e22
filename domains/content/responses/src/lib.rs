use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use content_models::{Blog, BlogListItem, ContactMessage, Project, Skill};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub stack: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            tags: project.tags,
            stack: project.stack,
            image_url: project.image_url,
            github_url: project.github_url,
            live_url: project.live_url,
            featured: project.featured,
            sort_order: project.sort_order,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub read_time: Option<i32>,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            slug: blog.slug,
            excerpt: blog.excerpt,
            content: blog.content,
            tags: blog.tags,
            image_url: blog.image_url,
            published: blog.published,
            published_at: blog.published_at,
            read_time: blog.read_time,
            views: blog.views,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

/// List payload for blog posts; omits the full body and the view counter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogListItemResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub read_time: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogListItem> for BlogListItemResponse {
    fn from(item: BlogListItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            slug: item.slug,
            excerpt: item.excerpt,
            tags: item.tags,
            image_url: item.image_url,
            published: item.published,
            published_at: item.published_at,
            read_time: item.read_time,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub id: Uuid,
    pub category: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub level: i32,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            category: skill.category,
            name: skill.name,
            icon_url: skill.icon_url,
            level: skill.level,
            sort_order: skill.sort_order,
            created_at: skill.created_at,
            updated_at: skill.updated_at,
        }
    }
}

/// The skills listing is flat when filtered by category and grouped by
/// category otherwise. `BTreeMap` keeps the groups in category order, which
/// matches the flat listing's primary sort.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SkillsListResponse {
    Flat(Vec<SkillResponse>),
    Grouped(BTreeMap<String, Vec<SkillResponse>>),
}

impl SkillsListResponse {
    pub fn grouped(skills: Vec<Skill>) -> Self {
        let mut groups: BTreeMap<String, Vec<SkillResponse>> = BTreeMap::new();
        for skill in skills {
            groups
                .entry(skill.category.clone())
                .or_default()
                .push(skill.into());
        }
        Self::Grouped(groups)
    }

    pub fn flat(skills: Vec<Skill>) -> Self {
        Self::Flat(skills.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactResponse {
    fn from(contact: ContactMessage) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            message: contact.message,
            read: contact.read,
            created_at: contact.created_at,
        }
    }
}

/// Body of the 201 reply to a contact-form submission. Only the identifier is
/// echoed back to the sender.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmittedResponse {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_response_uses_camel_case_keys() {
        let project = Project::builder()
            .title("Atelier".into())
            .description("Portfolio backend".into())
            .image_url(Some("https://cdn.example.com/shot.png".into()))
            .build();
        let json = serde_json::to_value(ProjectResponse::from(project)).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("order").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("image_url").is_none());
        assert!(json.get("deletedAt").is_none());
    }

    #[test]
    fn blog_list_item_has_no_content_or_views() {
        let item = BlogListItem::builder()
            .id(Uuid::now_v7())
            .title("Hello".into())
            .slug("hello".into())
            .build();
        let json = serde_json::to_value(BlogListItemResponse::from(item)).unwrap();
        assert!(json.get("content").is_none());
        assert!(json.get("views").is_none());
        assert!(json.get("slug").is_some());
    }

    #[test]
    fn grouped_skills_serialize_as_object_keyed_by_category() {
        let backend = Skill::builder()
            .category("Backend".into())
            .name("Rust".into())
            .build();
        let frontend = Skill::builder()
            .category("Frontend".into())
            .name("Svelte".into())
            .build();
        let json =
            serde_json::to_value(SkillsListResponse::grouped(vec![backend, frontend])).unwrap();
        assert!(json.is_object());
        assert_eq!(json["Backend"][0]["name"], "Rust");
        assert_eq!(json["Frontend"][0]["name"], "Svelte");
    }
}
