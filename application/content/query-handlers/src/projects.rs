use common_errors::{Paged, Pagination};
use content_cache_keys::{
    CONTENT_CACHE_TTL, ProjectCacheKey, ProjectsListCacheKey,
};
use content_dao::ProjectDao;
use content_errors::ContentError;
use content_queries::{GetProjectQuery, ListProjectsQuery};
use content_responses::ProjectResponse;
use dao_utils::PageParams;
use database_traits::dao::GenericDao;
use redis_connection::{CacheBind, CacheConnect};
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct GetProjectQueryHandler {
    project_dao: ProjectDao,
    cache: CacheConnect,
}

impl GetProjectQueryHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            project_dao: ProjectDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetProjectQuery,
    ) -> Result<ProjectResponse, ContentError> {
        let entry = ProjectCacheKey.bind_with(&self.cache, &query.project_id);

        if let Some(project) = entry.try_get().await {
            tracing::debug!("Cache hit for project {}", query.project_id);
            return Ok(project);
        }

        let project = self.project_dao.find_by_id(query.project_id).await?;
        entry.set_with_expire(&project, CONTENT_CACHE_TTL).await;

        Ok(project)
    }
}

#[derive(Clone)]
pub struct ListProjectsQueryHandler {
    project_dao: ProjectDao,
    cache: CacheConnect,
}

impl ListProjectsQueryHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            project_dao: ProjectDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListProjectsQuery,
    ) -> Result<Paged<ProjectResponse>, ContentError> {
        let params = PageParams::new(query.page, query.limit);

        let entry = ProjectsListCacheKey.bind_with_args(
            &self.cache,
            (&params.page, &params.limit, &query.featured_only),
        );
        if let Some(page) = entry.try_get().await {
            tracing::debug!("Cache hit for project listing");
            return Ok(page);
        }

        let items = self
            .project_dao
            .find_page(query.featured_only, params.limit, params.offset())
            .await?;
        let total = self
            .project_dao
            .count_visible(query.featured_only)
            .await?;

        let page = Paged::new(
            items.into_iter().map(ProjectResponse::from).collect(),
            Pagination::new(params.page, params.limit, total),
        );
        entry.set_with_expire(&page, CONTENT_CACHE_TTL).await;

        Ok(page)
    }
}
