use async_trait::async_trait;
use content_errors::ContentError;
use content_models::{Blog, BlogListItem, NewBlog, UpdateBlog};
use content_responses::BlogResponse;
use dao_utils::query_helpers::first_row_or_not_found;
use database_traits::dao::GenericDao;
use sql_connection::SqlConnect;
use tokio_postgres::error::SqlState;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct BlogDao {
    db: SqlConnect,
}

impl BlogDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn map_row(&self, row: &tokio_postgres::Row) -> Blog {
        Blog {
            id: row.get("id"),
            title: row.get("title"),
            slug: row.get("slug"),
            excerpt: row.get("excerpt"),
            content: row.get("content"),
            tags: row.get("tags"),
            image_url: row.get("image_url"),
            published: row.get("published"),
            published_at: row.get("published_at"),
            read_time: row.get("read_time"),
            views: row.get("views"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            deleted_at: row.get("deleted_at"),
        }
    }

    fn map_list_row(&self, row: &tokio_postgres::Row) -> BlogListItem {
        BlogListItem {
            id: row.get("id"),
            title: row.get("title"),
            slug: row.get("slug"),
            excerpt: row.get("excerpt"),
            tags: row.get("tags"),
            image_url: row.get("image_url"),
            published: row.get("published"),
            published_at: row.get("published_at"),
            read_time: row.get("read_time"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// A unique-index violation on the slug means a concurrent writer won
    /// the check-then-write race; surface it as a conflict the client can
    /// retry.
    fn classify_write_error(err: tokio_postgres::Error, slug: &str) -> ContentError {
        if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            ContentError::SlugConflict {
                slug: slug.to_string(),
            }
        }
        else {
            ContentError::Database(err)
        }
    }

    /// Looks up a live post by slug. Publication gating is the caller's
    /// concern, so an unpublished hit is still returned here.
    #[instrument(skip(self))]
    pub async fn find_by_slug(
        &self, slug: &str,
    ) -> Result<Option<Blog>, ContentError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title, slug, excerpt, content, tags, image_url, \
                 published, published_at, read_time, views, created_at, \
                 updated_at, deleted_at \
                 FROM blogs WHERE slug = $1 AND deleted_at IS NULL",
            )
            .await?;
        let rows = client.query(&stmt, &[&slug]).await?;

        Ok(rows.first().map(|row| self.map_row(row)))
    }

    /// Whether a live post already holds this slug, optionally ignoring one
    /// row (the post being renamed).
    #[instrument(skip(self))]
    pub async fn slug_in_use(
        &self, slug: &str, exclude_id: Option<Uuid>,
    ) -> Result<bool, ContentError> {
        let client = self.db.get_read_client().await?;

        let row = if let Some(exclude) = exclude_id {
            let stmt = client
                .prepare(
                    "SELECT EXISTS(SELECT 1 FROM blogs WHERE slug = $1 AND \
                     deleted_at IS NULL AND id <> $2)",
                )
                .await?;
            client.query_one(&stmt, &[&slug, &exclude]).await?
        }
        else {
            let stmt = client
                .prepare(
                    "SELECT EXISTS(SELECT 1 FROM blogs WHERE slug = $1 AND \
                     deleted_at IS NULL)",
                )
                .await?;
            client.query_one(&stmt, &[&slug]).await?
        };

        Ok(row.get(0))
    }

    #[instrument(skip(self))]
    pub async fn find_existing(
        &self, id: Uuid,
    ) -> Result<Blog, ContentError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title, slug, excerpt, content, tags, image_url, \
                 published, published_at, read_time, views, created_at, \
                 updated_at, deleted_at \
                 FROM blogs WHERE id = $1 AND deleted_at IS NULL",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row),
            ContentError::BlogNotFound { blog_id: id },
        )
    }

    /// One page of the listing projection, newest first. The full body and
    /// view counter stay out of the select list.
    #[instrument(skip(self))]
    pub async fn find_page(
        &self, published_only: bool, limit: u64, offset: u64,
    ) -> Result<Vec<BlogListItem>, ContentError> {
        let client = self.db.get_read_client().await?;

        let mut query = String::from(
            "SELECT id, title, slug, excerpt, tags, image_url, published, \
             published_at, read_time, created_at, updated_at \
             FROM blogs WHERE deleted_at IS NULL",
        );
        if published_only {
            query.push_str(" AND published = TRUE");
        }
        query.push_str(" ORDER BY created_at DESC LIMIT $1 OFFSET $2");

        let stmt = client.prepare(&query).await?;
        let rows = client
            .query(&stmt, &[&(limit as i64), &(offset as i64)])
            .await?;

        Ok(rows.iter().map(|row| self.map_list_row(row)).collect())
    }

    #[instrument(skip(self))]
    pub async fn count_visible(
        &self, published_only: bool,
    ) -> Result<i64, ContentError> {
        let client = self.db.get_read_client().await?;

        let query = if published_only {
            "SELECT COUNT(*) FROM blogs WHERE deleted_at IS NULL AND \
             published = TRUE"
        }
        else {
            "SELECT COUNT(*) FROM blogs WHERE deleted_at IS NULL"
        };

        let row = client.query_one(query, &[]).await?;
        Ok(row.get(0))
    }

    /// Soft-deletes and returns the tombstoned row; the caller still needs
    /// the slug to evict the detail cache entry.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: Uuid) -> Result<Blog, ContentError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "UPDATE blogs SET deleted_at = NOW() \
                 WHERE id = $1 AND deleted_at IS NULL \
                 RETURNING id, title, slug, excerpt, content, tags, \
                 image_url, published, published_at, read_time, views, \
                 created_at, updated_at, deleted_at",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row),
            ContentError::BlogNotFound { blog_id: id },
        )
    }
}

#[async_trait]
impl GenericDao for BlogDao {
    type CreateRequest = NewBlog;
    type Error = ContentError;
    type ID = Uuid;
    type Model = Blog;
    type Response = BlogResponse;
    type UpdateRequest = UpdateBlog;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        Ok(self.find_existing(id).await?.into())
    }

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title, slug, excerpt, content, tags, image_url, \
                 published, published_at, read_time, views, created_at, \
                 updated_at, deleted_at \
                 FROM blogs WHERE deleted_at IS NULL \
                 ORDER BY created_at DESC",
            )
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(|row| self.map_row(row).into()).collect())
    }

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let id = Uuid::now_v7();

        let stmt = client
            .prepare(
                "INSERT INTO blogs (id, title, slug, excerpt, content, tags, \
                 image_url, published, published_at, read_time) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
                 RETURNING id, title, slug, excerpt, content, tags, \
                 image_url, published, published_at, read_time, views, \
                 created_at, updated_at, deleted_at",
            )
            .await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &id,
                    &req.title,
                    &req.slug,
                    &req.excerpt,
                    &req.content,
                    &req.tags,
                    &req.image_url,
                    &req.published,
                    &req.published_at,
                    &req.read_time,
                ],
            )
            .await
            .map_err(|e| Self::classify_write_error(e, &req.slug))?;

        Ok(self.map_row(&row).into())
    }

    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "UPDATE blogs SET title = $2, slug = $3, excerpt = $4, \
                 content = $5, tags = $6, image_url = $7, published = $8, \
                 published_at = $9, read_time = $10, updated_at = NOW() \
                 WHERE id = $1 AND deleted_at IS NULL \
                 RETURNING id, title, slug, excerpt, content, tags, \
                 image_url, published, published_at, read_time, views, \
                 created_at, updated_at, deleted_at",
            )
            .await?;
        let rows = client
            .query(
                &stmt,
                &[
                    &id,
                    &req.title,
                    &req.slug,
                    &req.excerpt,
                    &req.content,
                    &req.tags,
                    &req.image_url,
                    &req.published,
                    &req.published_at,
                    &req.read_time,
                ],
            )
            .await
            .map_err(|e| Self::classify_write_error(e, &req.slug))?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row).into(),
            ContentError::BlogNotFound { blog_id: id },
        )
    }

    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        self.soft_delete(id).await.map(|_| ())
    }
}
