use common_errors::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Database error: {0}")]
    Database(#[from] sql_connection::PgError),
    #[error("Connection error: {0}")]
    Connection(#[from] sql_connection::PoolError),
    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: Uuid },
    #[error("Blog post not found: {blog_id}")]
    BlogNotFound { blog_id: Uuid },
    #[error("Blog post not found: {slug}")]
    BlogSlugNotFound { slug: String },
    #[error("Skill not found: {skill_id}")]
    SkillNotFound { skill_id: Uuid },
    #[error("Contact message not found: {contact_id}")]
    ContactNotFound { contact_id: Uuid },
    #[error("Slug already in use: {slug}")]
    SlugConflict { slug: String },
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Database(_) | ContentError::Connection(_) => {
                tracing::error!("Content store failure: {}", err);
                AppError::internal_server_error("Database operation failed")
            }
            ContentError::ProjectNotFound { .. } => {
                AppError::not_found("PROJECT_NOT_FOUND", "Project not found")
            }
            ContentError::BlogNotFound { .. } | ContentError::BlogSlugNotFound { .. } => {
                AppError::not_found("BLOG_NOT_FOUND", "Blog post not found")
            }
            ContentError::SkillNotFound { .. } => {
                AppError::not_found("SKILL_NOT_FOUND", "Skill not found")
            }
            ContentError::ContactNotFound { .. } => {
                AppError::not_found("CONTACT_NOT_FOUND", "Contact message not found")
            }
            ContentError::SlugConflict { slug } => AppError::conflict(
                "SLUG_CONFLICT",
                &format!("Slug '{slug}' is already in use"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err: AppError = ContentError::ProjectNotFound {
            project_id: Uuid::nil(),
        }
        .into();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn slug_conflict_maps_to_409() {
        let err: AppError = ContentError::SlugConflict {
            slug: "hello-world".into(),
        }
        .into();
        assert_eq!(err.status_code(), 409);
    }
}
