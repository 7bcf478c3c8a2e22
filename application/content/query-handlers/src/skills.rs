use content_cache_keys::{
    ALL_SKILLS, SKILLS_CACHE_TTL, SkillsListCacheKey,
};
use content_dao::SkillDao;
use content_errors::ContentError;
use content_queries::{GetSkillQuery, ListSkillsQuery};
use content_responses::{SkillResponse, SkillsListResponse};
use database_traits::dao::GenericDao;
use redis_connection::{CacheBind, CacheConnect};
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct ListSkillsQueryHandler {
    skill_dao: SkillDao,
    cache: CacheConnect,
}

impl ListSkillsQueryHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            skill_dao: SkillDao::new(db),
            cache,
        }
    }

    /// Returns the catalogue grouped by category, or a flat list when a
    /// single category is asked for.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListSkillsQuery,
    ) -> Result<SkillsListResponse, ContentError> {
        let category_key = query
            .category
            .clone()
            .unwrap_or_else(|| ALL_SKILLS.to_string());
        let entry = SkillsListCacheKey.bind_with(&self.cache, &category_key);

        if let Some(list) = entry.try_get().await {
            tracing::debug!("Cache hit for skills '{}'", category_key);
            return Ok(list);
        }

        let skills =
            self.skill_dao.list_all(query.category.as_deref()).await?;
        let response = if query.category.is_some() {
            SkillsListResponse::flat(skills)
        }
        else {
            SkillsListResponse::grouped(skills)
        };
        entry.set_with_expire(&response, SKILLS_CACHE_TTL).await;

        Ok(response)
    }
}

/// Single-skill lookup. An admin edit form reads this right before writing,
/// so it goes straight to the database.
#[derive(Clone)]
pub struct GetSkillQueryHandler {
    skill_dao: SkillDao,
}

impl GetSkillQueryHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            skill_dao: SkillDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetSkillQuery,
    ) -> Result<SkillResponse, ContentError> {
        self.skill_dao.find_by_id(query.skill_id).await
    }
}
