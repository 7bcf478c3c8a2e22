use content_cache_keys::{PROJECTS_PATTERN, ProjectCacheKey};
use content_commands::{
    CreateProjectCommand, DeleteProjectCommand, UpdateProjectCommand,
};
use content_dao::ProjectDao;
use content_errors::ContentError;
use content_models::{NewProject, UpdateProject};
use content_responses::ProjectResponse;
use database_traits::dao::GenericDao;
use redis_connection::{CacheBind, CacheConnect};
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct CreateProjectHandler {
    project_dao: ProjectDao,
    cache: CacheConnect,
}

impl CreateProjectHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            project_dao: ProjectDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateProjectCommand,
    ) -> Result<ProjectResponse, ContentError> {
        let created = self
            .project_dao
            .create(NewProject {
                title: command.title,
                description: command.description,
                tags: command.tags,
                stack: command.stack,
                image_url: command.image_url,
                github_url: command.github_url,
                live_url: command.live_url,
                featured: command.featured,
                sort_order: command.sort_order,
            })
            .await?;

        self.cache.invalidate_pattern(PROJECTS_PATTERN).await;

        Ok(created)
    }
}

#[derive(Clone)]
pub struct UpdateProjectHandler {
    project_dao: ProjectDao,
    cache: CacheConnect,
}

impl UpdateProjectHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            project_dao: ProjectDao::new(db),
            cache,
        }
    }

    /// Merges the provided fields over the stored row and writes the result
    /// back in one statement.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, project_id: Uuid, command: UpdateProjectCommand,
    ) -> Result<ProjectResponse, ContentError> {
        let existing = self.project_dao.find_existing(project_id).await?;

        let update = UpdateProject {
            title: command.title.unwrap_or(existing.title),
            description: command.description.unwrap_or(existing.description),
            tags: command.tags.unwrap_or(existing.tags),
            stack: command.stack.unwrap_or(existing.stack),
            image_url: command.image_url.or(existing.image_url),
            github_url: command.github_url.or(existing.github_url),
            live_url: command.live_url.or(existing.live_url),
            featured: command.featured.unwrap_or(existing.featured),
            sort_order: command.sort_order.unwrap_or(existing.sort_order),
        };

        let updated = self.project_dao.update(project_id, update).await?;

        self.cache.invalidate_pattern(PROJECTS_PATTERN).await;
        ProjectCacheKey
            .bind_with(&self.cache, &project_id)
            .remove()
            .await;

        Ok(updated)
    }
}

#[derive(Clone)]
pub struct DeleteProjectHandler {
    project_dao: ProjectDao,
    cache: CacheConnect,
}

impl DeleteProjectHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            project_dao: ProjectDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteProjectCommand,
    ) -> Result<(), ContentError> {
        self.project_dao.delete(command.project_id).await?;

        self.cache.invalidate_pattern(PROJECTS_PATTERN).await;
        ProjectCacheKey
            .bind_with(&self.cache, &command.project_id)
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
        CreateProjectHandler,
        UpdateProjectHandler,
        DeleteProjectHandler,
    )> {
        let container = TestPostgresContainer::new().await?;
        let redis = TestRedisContainer::new().await?;
        let db = create_sql_connect(&container);
        let cache = create_cache_connect(&redis);

        let create_handler =
            CreateProjectHandler::new(db.clone(), cache.clone());
        let update_handler =
            UpdateProjectHandler::new(db.clone(), cache.clone());
        let delete_handler = DeleteProjectHandler::new(db, cache);

        Ok((
            container,
            redis,
            create_handler,
            update_handler,
            delete_handler,
        ))
    }

    fn sample_command() -> CreateProjectCommand {
        CreateProjectCommand {
            title: "Terrain renderer".to_string(),
            description: "GPU-driven heightmap renderer".to_string(),
            tags: vec!["graphics".to_string()],
            stack: vec!["wgpu".to_string()],
            image_url: None,
            github_url: Some("https://github.com/x/terrain".to_string()),
            live_url: None,
            featured: false,
            sort_order: 2,
        }
    }

    #[tokio::test]
    async fn create_persists_and_returns_project() {
        let (_container, _redis, create_handler, ..) =
            setup_test_handlers().await.unwrap();

        let result = create_handler.execute(sample_command()).await.unwrap();

        assert_eq!(result.title, "Terrain renderer");
        assert_eq!(result.sort_order, 2);
        assert!(!result.featured);
        assert!(!result.id.is_nil());
    }

    #[tokio::test]
    async fn update_keeps_fields_left_out_of_the_command() {
        let (_container, _redis, create_handler, update_handler, _) =
            setup_test_handlers().await.unwrap();

        let created = create_handler.execute(sample_command()).await.unwrap();

        let updated = update_handler
            .execute(created.id, UpdateProjectCommand {
                featured: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(updated.featured);
        assert_eq!(updated.title, "Terrain renderer");
        assert_eq!(
            updated.github_url.as_deref(),
            Some("https://github.com/x/terrain")
        );
    }

    #[tokio::test]
    async fn update_missing_project_reports_not_found() {
        let (_container, _redis, _, update_handler, _) =
            setup_test_handlers().await.unwrap();

        let result = update_handler
            .execute(Uuid::now_v7(), UpdateProjectCommand::default())
            .await;

        assert!(matches!(
            result,
            Err(ContentError::ProjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_hides_project_from_lookups() {
        let (_container, _redis, create_handler, update_handler, delete_handler) =
            setup_test_handlers().await.unwrap();

        let created = create_handler.execute(sample_command()).await.unwrap();

        delete_handler
            .execute(DeleteProjectCommand {
                project_id: created.id,
            })
            .await
            .unwrap();

        let result = update_handler
            .execute(created.id, UpdateProjectCommand::default())
            .await;
        assert!(matches!(
            result,
            Err(ContentError::ProjectNotFound { .. })
        ));
    }
}
