use std::time::Duration;

use common_errors::Paged;
use content_responses::{
    BlogListItemResponse, BlogResponse, ProjectResponse, SkillsListResponse,
};
use redis_connection::cache_key;
use uuid::Uuid;

cache_key!(ProjectCacheKey::<ProjectResponse> => "project:{}"[id: Uuid]);
cache_key!(ProjectsListCacheKey::<Paged<ProjectResponse>> => "projects:list:{}:{}:{}"[page: u64, limit: u64, featured_only: bool]);
cache_key!(BlogCacheKey::<BlogResponse> => "blog:{}"[slug: String]);
cache_key!(BlogsListCacheKey::<Paged<BlogListItemResponse>> => "blogs:list:{}:{}:{}"[page: u64, limit: u64, published_only: bool]);
cache_key!(SkillsListCacheKey::<SkillsListResponse> => "skills:list:{}"[category: String]);

/// Pattern arg for the unfiltered skills listing.
pub const ALL_SKILLS: &str = "all";

/// Namespace patterns handed to `invalidate_pattern` after a write. Single
/// detail keys live outside these namespaces and are deleted individually.
pub const PROJECTS_PATTERN: &str = "projects:*";
pub const BLOGS_PATTERN: &str = "blogs:*";
pub const SKILLS_PATTERN: &str = "skills:*";

pub const CONTENT_CACHE_TTL: Duration = Duration::from_secs(600);
pub const SKILLS_CACHE_TTL: Duration = Duration::from_secs(1800);

#[cfg(test)]
mod tests {
    use redis_connection::key::CacheKey;

    use super::*;

    #[test]
    fn list_key_encodes_every_filter_param() {
        let key = ProjectsListCacheKey.get_key_with_args((&2, &25, &true));
        assert_eq!(key, "projects:list:2:25:true");
    }

    #[test]
    fn detail_keys_use_singular_namespace() {
        let id = Uuid::nil();
        let key = ProjectCacheKey.get_key_with_args((&id,));
        assert_eq!(key, format!("project:{id}"));
        let blog = BlogCacheKey.get_key_with_args((&"hello-world".to_string(),));
        assert_eq!(blog, "blog:hello-world");
    }
}
