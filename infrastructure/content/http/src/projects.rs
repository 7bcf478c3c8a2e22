use admin_auth::AdminUser;
use analytics_models::ViewTarget;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{delete, get, post, put},
};
use common_errors::{ApiResponse, AppError};
use content_commands::{
    CreateProjectCommand, DeleteProjectCommand, UpdateProjectCommand,
};
use content_queries::{GetProjectQuery, ListProjectsQuery};
use content_responses::ProjectResponse;
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{ContentServices, tracking::dispatch_view};

pub struct ProjectHandlers;

impl ProjectHandlers {
    pub fn routes() -> Router<ContentServices> {
        Router::new()
            .route("/", get(list_projects))
            .route("/", post(create_project))
            .route("/{id}", get(get_project))
            .route("/{id}", put(update_project))
            .route("/{id}", delete(delete_project))
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListProjectsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Pass `featured=true` to restrict the listing to featured projects.
    pub featured: Option<String>,
}

#[utoipa::path(
    get,
    path = "/projects",
    params(
        ListProjectsParams
    ),
    responses(
        (status = 200, description = "Paginated project listing", body = Vec<ProjectResponse>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "projects"
)]
#[instrument(skip_all)]
pub async fn list_projects(
    State(services): State<ContentServices>,
    Query(params): Query<ListProjectsParams>,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, AppError> {
    let query = ListProjectsQuery {
        page: params.page,
        limit: params.limit,
        featured_only: params.featured.as_deref() == Some("true"),
    };
    let page = services.list_projects.execute(query).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 404, description = "Project not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "projects"
)]
#[instrument(skip_all)]
pub async fn get_project(
    State(services): State<ContentServices>, Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<ProjectResponse>>, AppError> {
    let project = services
        .get_project
        .execute(GetProjectQuery { project_id: id })
        .await?;

    dispatch_view(&services.track_view, ViewTarget::Project(id), &headers);

    Ok(Json(ApiResponse::new(project)))
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectCommand,
    responses(
        (status = 201, description = "Project created successfully", body = ProjectResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "projects"
)]
#[instrument(skip_all)]
pub async fn create_project(
    _admin: AdminUser, State(services): State<ContentServices>,
    Json(command): Json<CreateProjectCommand>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectResponse>>), AppError> {
    let created = services.create_project.execute(command).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            created,
            "Project created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/projects/{id}",
    request_body = UpdateProjectCommand,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Project not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "projects"
)]
#[instrument(skip_all)]
pub async fn update_project(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>, Json(command): Json<UpdateProjectCommand>,
) -> Result<Json<ApiResponse<ProjectResponse>>, AppError> {
    let updated = services.update_project.execute(id, command).await?;
    Ok(Json(ApiResponse::with_message(
        updated,
        "Project updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully"),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Project not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "projects"
)]
#[instrument(skip_all)]
pub async fn delete_project(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let command = DeleteProjectCommand { project_id: id };
    services.delete_project.execute(command).await?;
    Ok(Json(ApiResponse::with_message(
        (),
        "Project deleted successfully",
    )))
}
