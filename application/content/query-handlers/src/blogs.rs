use common_errors::{Paged, Pagination};
use content_cache_keys::{
    BlogCacheKey, BlogsListCacheKey, CONTENT_CACHE_TTL,
};
use content_dao::BlogDao;
use content_errors::ContentError;
use content_queries::{GetBlogBySlugQuery, ListBlogsQuery};
use content_responses::{BlogListItemResponse, BlogResponse};
use dao_utils::PageParams;
use redis_connection::{CacheBind, CacheConnect};
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct GetBlogBySlugQueryHandler {
    blog_dao: BlogDao,
    cache: CacheConnect,
}

impl GetBlogBySlugQueryHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            blog_dao: BlogDao::new(db),
            cache,
        }
    }

    /// Resolves a post by slug. Unpublished posts surface only when the
    /// query allows them, and they never enter the cache, so an anonymous
    /// reader can never be served a draft.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetBlogBySlugQuery,
    ) -> Result<BlogResponse, ContentError> {
        let entry = BlogCacheKey.bind_with(&self.cache, &query.slug);

        if let Some(blog) = entry.try_get().await {
            tracing::debug!("Cache hit for blog '{}'", query.slug);
            return Ok(blog);
        }

        let blog = self
            .blog_dao
            .find_by_slug(&query.slug)
            .await?
            .ok_or_else(|| {
                ContentError::BlogSlugNotFound {
                    slug: query.slug.clone(),
                }
            })?;

        if !blog.published && !query.allow_unpublished {
            return Err(ContentError::BlogSlugNotFound {
                slug: query.slug.clone(),
            });
        }

        let response = BlogResponse::from(blog);
        if response.published {
            entry.set_with_expire(&response, CONTENT_CACHE_TTL).await;
        }

        Ok(response)
    }
}

#[derive(Clone)]
pub struct ListBlogsQueryHandler {
    blog_dao: BlogDao,
    cache: CacheConnect,
}

impl ListBlogsQueryHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            blog_dao: BlogDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListBlogsQuery,
    ) -> Result<Paged<BlogListItemResponse>, ContentError> {
        let params = PageParams::new(query.page, query.limit);

        let entry = BlogsListCacheKey.bind_with_args(
            &self.cache,
            (&params.page, &params.limit, &query.published_only),
        );
        if let Some(page) = entry.try_get().await {
            tracing::debug!("Cache hit for blog listing");
            return Ok(page);
        }

        let items = self
            .blog_dao
            .find_page(query.published_only, params.limit, params.offset())
            .await?;
        let total = self
            .blog_dao
            .count_visible(query.published_only)
            .await?;

        let page = Paged::new(
            items.into_iter().map(BlogListItemResponse::from).collect(),
            Pagination::new(params.page, params.limit, total),
        );
        entry.set_with_expire(&page, CONTENT_CACHE_TTL).await;

        Ok(page)
    }
}
