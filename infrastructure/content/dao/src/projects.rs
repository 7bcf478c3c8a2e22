use async_trait::async_trait;
use content_errors::ContentError;
use content_models::{NewProject, Project, UpdateProject};
use content_responses::ProjectResponse;
use dao_utils::query_helpers::first_row_or_not_found;
use database_traits::dao::GenericDao;
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProjectDao {
    db: SqlConnect,
}

impl ProjectDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn map_row(&self, row: &tokio_postgres::Row) -> Project {
        Project {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            tags: row.get("tags"),
            stack: row.get("stack"),
            image_url: row.get("image_url"),
            github_url: row.get("github_url"),
            live_url: row.get("live_url"),
            featured: row.get("featured"),
            sort_order: row.get("sort_order"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            deleted_at: row.get("deleted_at"),
        }
    }

    /// One page of the public listing: featured first, then manual order,
    /// then newest.
    #[instrument(skip(self))]
    pub async fn find_page(
        &self, featured_only: bool, limit: u64, offset: u64,
    ) -> Result<Vec<Project>, ContentError> {
        let client = self.db.get_read_client().await?;

        let mut query = String::from(
            "SELECT id, title, description, tags, stack, image_url, \
             github_url, live_url, featured, sort_order, created_at, \
             updated_at, deleted_at \
             FROM projects WHERE deleted_at IS NULL",
        );
        if featured_only {
            query.push_str(" AND featured = TRUE");
        }
        query.push_str(
            " ORDER BY featured DESC, sort_order ASC, created_at DESC \
             LIMIT $1 OFFSET $2",
        );

        let stmt = client.prepare(&query).await?;
        let rows = client
            .query(&stmt, &[&(limit as i64), &(offset as i64)])
            .await?;

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }

    /// Fetches the live row as a model, for merge-style partial updates.
    #[instrument(skip(self))]
    pub async fn find_existing(
        &self, id: Uuid,
    ) -> Result<Project, ContentError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title, description, tags, stack, image_url, \
                 github_url, live_url, featured, sort_order, created_at, \
                 updated_at, deleted_at \
                 FROM projects WHERE id = $1 AND deleted_at IS NULL",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row),
            ContentError::ProjectNotFound { project_id: id },
        )
    }

    #[instrument(skip(self))]
    pub async fn count_visible(
        &self, featured_only: bool,
    ) -> Result<i64, ContentError> {
        let client = self.db.get_read_client().await?;

        let query = if featured_only {
            "SELECT COUNT(*) FROM projects WHERE deleted_at IS NULL AND \
             featured = TRUE"
        }
        else {
            "SELECT COUNT(*) FROM projects WHERE deleted_at IS NULL"
        };

        let row = client.query_one(query, &[]).await?;
        Ok(row.get(0))
    }
}

#[async_trait]
impl GenericDao for ProjectDao {
    type CreateRequest = NewProject;
    type Error = ContentError;
    type ID = Uuid;
    type Model = Project;
    type Response = ProjectResponse;
    type UpdateRequest = UpdateProject;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title, description, tags, stack, image_url, \
                 github_url, live_url, featured, sort_order, created_at, \
                 updated_at, deleted_at \
                 FROM projects WHERE id = $1 AND deleted_at IS NULL",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row).into(),
            ContentError::ProjectNotFound { project_id: id },
        )
    }

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title, description, tags, stack, image_url, \
                 github_url, live_url, featured, sort_order, created_at, \
                 updated_at, deleted_at \
                 FROM projects WHERE deleted_at IS NULL \
                 ORDER BY featured DESC, sort_order ASC, created_at DESC",
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
                "INSERT INTO projects (id, title, description, tags, stack, \
                 image_url, github_url, live_url, featured, sort_order) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
                 RETURNING id, title, description, tags, stack, image_url, \
                 github_url, live_url, featured, sort_order, created_at, \
                 updated_at, deleted_at",
            )
            .await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &id,
                    &req.title,
                    &req.description,
                    &req.tags,
                    &req.stack,
                    &req.image_url,
                    &req.github_url,
                    &req.live_url,
                    &req.featured,
                    &req.sort_order,
                ],
            )
            .await?;

        Ok(self.map_row(&row).into())
    }

    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "UPDATE projects SET title = $2, description = $3, \
                 tags = $4, stack = $5, image_url = $6, github_url = $7, \
                 live_url = $8, featured = $9, sort_order = $10, \
                 updated_at = NOW() \
                 WHERE id = $1 AND deleted_at IS NULL \
                 RETURNING id, title, description, tags, stack, image_url, \
                 github_url, live_url, featured, sort_order, created_at, \
                 updated_at, deleted_at",
            )
            .await?;
        let rows = client
            .query(
                &stmt,
                &[
                    &id,
                    &req.title,
                    &req.description,
                    &req.tags,
                    &req.stack,
                    &req.image_url,
                    &req.github_url,
                    &req.live_url,
                    &req.featured,
                    &req.sort_order,
                ],
            )
            .await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row).into(),
            ContentError::ProjectNotFound { project_id: id },
        )
    }

    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "UPDATE projects SET deleted_at = NOW() \
                 WHERE id = $1 AND deleted_at IS NULL",
            )
            .await?;
        let affected = client.execute(&stmt, &[&id]).await?;

        if affected == 0 {
            return Err(ContentError::ProjectNotFound { project_id: id });
        }

        Ok(())
    }
}
