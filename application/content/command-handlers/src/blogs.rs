use chrono::Utc;
use content_cache_keys::{BLOGS_PATTERN, BlogCacheKey};
use content_commands::{
    CreateBlogCommand, DeleteBlogCommand, UpdateBlogCommand,
};
use content_dao::BlogDao;
use content_errors::ContentError;
use content_models::{NewBlog, UpdateBlog};
use content_responses::BlogResponse;
use database_traits::dao::GenericDao;
use redis_connection::{CacheBind, CacheConnect};
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

/// Reading speed behind the estimated-minutes field.
const WORDS_PER_MINUTE: usize = 200;

fn estimate_read_time(content: &str) -> Option<i32> {
    let words = content.split_whitespace().count();
    if words == 0 {
        return None;
    }

    Some(words.div_ceil(WORDS_PER_MINUTE) as i32)
}

/// Suffixes the base slug with a counter until no live post holds it. Rows
/// already soft-deleted release their slug for reuse.
async fn unique_slug(
    dao: &BlogDao, base: &str, exclude_id: Option<Uuid>,
) -> Result<String, ContentError> {
    if !dao.slug_in_use(base, exclude_id).await? {
        return Ok(base.to_string());
    }

    let mut counter = 1u32;
    loop {
        let candidate = format!("{base}-{counter}");
        if !dao.slug_in_use(&candidate, exclude_id).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

#[derive(Clone)]
pub struct CreateBlogHandler {
    blog_dao: BlogDao,
    cache: CacheConnect,
}

impl CreateBlogHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            blog_dao: BlogDao::new(db),
            cache,
        }
    }

    /// A slug supplied by the caller must be free, otherwise the request is
    /// rejected. Slugs derived from the title pick up a counter suffix
    /// instead.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateBlogCommand,
    ) -> Result<BlogResponse, ContentError> {
        let slug = match command.slug.as_deref().filter(|slug| !slug.is_empty())
        {
            Some(requested) => {
                if self.blog_dao.slug_in_use(requested, None).await? {
                    return Err(ContentError::SlugConflict {
                        slug: requested.to_string(),
                    });
                }
                requested.to_string()
            },
            None => {
                unique_slug(
                    &self.blog_dao,
                    &slug::slugify(&command.title),
                    None,
                )
                .await?
            },
        };

        let published_at = command.published.then(Utc::now);
        let read_time = estimate_read_time(&command.content);

        let created = self
            .blog_dao
            .create(NewBlog {
                title: command.title,
                slug: slug.clone(),
                excerpt: command.excerpt,
                content: command.content,
                tags: command.tags,
                image_url: command.image_url,
                published: command.published,
                published_at,
                read_time,
            })
            .await?;

        self.cache.invalidate_pattern(BLOGS_PATTERN).await;
        // A soft-deleted predecessor may have left a detail entry behind
        // under the now-reused slug.
        BlogCacheKey.bind_with(&self.cache, &slug).remove().await;

        Ok(created)
    }
}

#[derive(Clone)]
pub struct UpdateBlogHandler {
    blog_dao: BlogDao,
    cache: CacheConnect,
}

impl UpdateBlogHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            blog_dao: BlogDao::new(db),
            cache,
        }
    }

    /// Merges the provided fields over the stored row. The slug follows the
    /// title: it is regenerated only when the title actually changes, and
    /// the first publish stamps `published_at` once.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, blog_id: Uuid, command: UpdateBlogCommand,
    ) -> Result<BlogResponse, ContentError> {
        let existing = self.blog_dao.find_existing(blog_id).await?;

        let title_changed = command
            .title
            .as_ref()
            .is_some_and(|title| *title != existing.title);
        let title = command.title.unwrap_or(existing.title);

        let slug = if title_changed {
            unique_slug(&self.blog_dao, &slug::slugify(&title), Some(blog_id))
                .await?
        }
        else {
            existing.slug.clone()
        };

        let read_time = match &command.content {
            Some(content) => {
                estimate_read_time(content).or(existing.read_time)
            },
            None => existing.read_time,
        };
        let content = command.content.unwrap_or(existing.content);

        let published = command.published.unwrap_or(existing.published);
        let published_at =
            if command.published == Some(true) && !existing.published {
                Some(Utc::now())
            }
            else {
                existing.published_at
            };

        let updated = self
            .blog_dao
            .update(blog_id, UpdateBlog {
                title,
                slug: slug.clone(),
                excerpt: command.excerpt.or(existing.excerpt),
                content,
                tags: command.tags.unwrap_or(existing.tags),
                image_url: command.image_url.or(existing.image_url),
                published,
                published_at,
                read_time,
            })
            .await?;

        self.cache.invalidate_pattern(BLOGS_PATTERN).await;
        BlogCacheKey
            .bind_with(&self.cache, &existing.slug)
            .remove()
            .await;
        if slug != existing.slug {
            BlogCacheKey.bind_with(&self.cache, &slug).remove().await;
        }

        Ok(updated)
    }
}

#[derive(Clone)]
pub struct DeleteBlogHandler {
    blog_dao: BlogDao,
    cache: CacheConnect,
}

impl DeleteBlogHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            blog_dao: BlogDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteBlogCommand,
    ) -> Result<(), ContentError> {
        let deleted = self.blog_dao.soft_delete(command.blog_id).await?;

        self.cache.invalidate_pattern(BLOGS_PATTERN).await;
        BlogCacheKey
            .bind_with(&self.cache, &deleted.slug)
            .remove()
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_utils::*;

    use super::*;

    async fn setup_test_handlers() -> anyhow::Result<(
        TestPostgresContainer,
        TestRedisContainer,
        CreateBlogHandler,
        UpdateBlogHandler,
        DeleteBlogHandler,
    )> {
        let container = TestPostgresContainer::new().await?;
        let redis = TestRedisContainer::new().await?;
        let db = create_sql_connect(&container);
        let cache = create_cache_connect(&redis);

        let create_handler = CreateBlogHandler::new(db.clone(), cache.clone());
        let update_handler = UpdateBlogHandler::new(db.clone(), cache.clone());
        let delete_handler = DeleteBlogHandler::new(db, cache);

        Ok((
            container,
            redis,
            create_handler,
            update_handler,
            delete_handler,
        ))
    }

    fn draft_command(title: &str) -> CreateBlogCommand {
        CreateBlogCommand {
            title: title.to_string(),
            slug: None,
            excerpt: None,
            content: "word ".repeat(250),
            tags: vec![],
            image_url: None,
            published: false,
        }
    }

    #[tokio::test]
    async fn create_derives_slug_and_read_time() {
        let (_container, _redis, create_handler, ..) =
            setup_test_handlers().await.unwrap();

        let created = create_handler
            .execute(draft_command("Profiling Async Rust"))
            .await
            .unwrap();

        assert_eq!(created.slug, "profiling-async-rust");
        assert_eq!(created.read_time, Some(2));
        assert!(!created.published);
        assert_eq!(created.published_at, None);
    }

    #[tokio::test]
    async fn create_suffixes_slug_on_collision() {
        let (_container, _redis, create_handler, ..) =
            setup_test_handlers().await.unwrap();

        let first = create_handler
            .execute(draft_command("Hello World"))
            .await
            .unwrap();
        let second = create_handler
            .execute(draft_command("Hello World"))
            .await
            .unwrap();

        assert_eq!(first.slug, "hello-world");
        assert_eq!(second.slug, "hello-world-1");
    }

    #[tokio::test]
    async fn create_respects_explicit_slug() {
        let (_container, _redis, create_handler, ..) =
            setup_test_handlers().await.unwrap();

        let mut command = draft_command("Some Title");
        command.slug = Some("custom-slug".to_string());
        let created = create_handler.execute(command).await.unwrap();

        assert_eq!(created.slug, "custom-slug");
    }

    #[tokio::test]
    async fn create_rejects_taken_explicit_slug() {
        let (_container, _redis, create_handler, ..) =
            setup_test_handlers().await.unwrap();

        let mut command = draft_command("First Post");
        command.slug = Some("taken".to_string());
        create_handler.execute(command).await.unwrap();

        let mut duplicate = draft_command("Second Post");
        duplicate.slug = Some("taken".to_string());
        let result = create_handler.execute(duplicate).await;

        assert!(matches!(result, Err(ContentError::SlugConflict { .. })));
    }

    #[tokio::test]
    async fn publishing_stamps_published_at_once() {
        let (_container, _redis, create_handler, update_handler, _) =
            setup_test_handlers().await.unwrap();

        let created = create_handler
            .execute(draft_command("Release Notes"))
            .await
            .unwrap();

        let published = update_handler
            .execute(created.id, UpdateBlogCommand {
                published: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        let first_stamp = published.published_at.unwrap();

        // Unpublish and republish; the original timestamp survives.
        update_handler
            .execute(created.id, UpdateBlogCommand {
                published: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        let republished = update_handler
            .execute(created.id, UpdateBlogCommand {
                published: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(republished.published_at, Some(first_stamp));
    }

    #[tokio::test]
    async fn update_regenerates_slug_only_when_title_changes() {
        let (_container, _redis, create_handler, update_handler, _) =
            setup_test_handlers().await.unwrap();

        let created = create_handler
            .execute(draft_command("Original Title"))
            .await
            .unwrap();

        let untouched = update_handler
            .execute(created.id, UpdateBlogCommand {
                excerpt: Some("summary".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(untouched.slug, "original-title");

        let renamed = update_handler
            .execute(created.id, UpdateBlogCommand {
                title: Some("Brand New Title".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(renamed.slug, "brand-new-title");
    }

    #[tokio::test]
    async fn soft_deleted_post_releases_its_slug() {
        let (_container, _redis, create_handler, _, delete_handler) =
            setup_test_handlers().await.unwrap();

        let first = create_handler
            .execute(draft_command("Recycled"))
            .await
            .unwrap();
        delete_handler
            .execute(DeleteBlogCommand { blog_id: first.id })
            .await
            .unwrap();

        let second = create_handler
            .execute(draft_command("Recycled"))
            .await
            .unwrap();

        assert_eq!(second.slug, "recycled");
    }
}
