use admin_auth::AdminUser;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
};
use common_errors::{ApiResponse, AppError};
use content_commands::{
    CreateSkillCommand, DeleteSkillCommand, UpdateSkillCommand,
};
use content_queries::{GetSkillQuery, ListSkillsQuery};
use content_responses::{SkillResponse, SkillsListResponse};
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::ContentServices;

pub struct SkillHandlers;

impl SkillHandlers {
    pub fn routes() -> Router<ContentServices> {
        Router::new()
            .route("/", get(list_skills))
            .route("/", post(create_skill))
            .route("/{id}", get(get_skill))
            .route("/{id}", put(update_skill))
            .route("/{id}", delete(delete_skill))
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListSkillsParams {
    /// Filter to one category; the unfiltered listing is grouped by
    /// category.
    pub category: Option<String>,
}

#[utoipa::path(
    get,
    path = "/skills",
    params(
        ListSkillsParams
    ),
    responses(
        (status = 200, description = "Skill listing, grouped by category unless filtered", body = SkillsListResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "skills"
)]
#[instrument(skip_all)]
pub async fn list_skills(
    State(services): State<ContentServices>,
    Query(params): Query<ListSkillsParams>,
) -> Result<Json<ApiResponse<SkillsListResponse>>, AppError> {
    let query = ListSkillsQuery {
        category: params.category,
    };
    let skills = services.list_skills.execute(query).await?;
    Ok(Json(ApiResponse::new(skills)))
}

#[utoipa::path(
    get,
    path = "/skills/{id}",
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    responses(
        (status = 200, description = "Skill found", body = SkillResponse),
        (status = 404, description = "Skill not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "skills"
)]
#[instrument(skip_all)]
pub async fn get_skill(
    State(services): State<ContentServices>, Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SkillResponse>>, AppError> {
    let skill = services
        .get_skill
        .execute(GetSkillQuery { skill_id: id })
        .await?;
    Ok(Json(ApiResponse::new(skill)))
}

#[utoipa::path(
    post,
    path = "/skills",
    request_body = CreateSkillCommand,
    responses(
        (status = 201, description = "Skill created successfully", body = SkillResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "skills"
)]
#[instrument(skip_all)]
pub async fn create_skill(
    _admin: AdminUser, State(services): State<ContentServices>,
    Json(command): Json<CreateSkillCommand>,
) -> Result<(StatusCode, Json<ApiResponse<SkillResponse>>), AppError> {
    let created = services.create_skill.execute(command).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            created,
            "Skill created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/skills/{id}",
    request_body = UpdateSkillCommand,
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    responses(
        (status = 200, description = "Skill updated successfully", body = SkillResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Skill not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "skills"
)]
#[instrument(skip_all)]
pub async fn update_skill(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>, Json(command): Json<UpdateSkillCommand>,
) -> Result<Json<ApiResponse<SkillResponse>>, AppError> {
    let updated = services.update_skill.execute(id, command).await?;
    Ok(Json(ApiResponse::with_message(
        updated,
        "Skill updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/skills/{id}",
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    responses(
        (status = 200, description = "Skill deleted successfully"),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Skill not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "skills"
)]
#[instrument(skip_all)]
pub async fn delete_skill(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let command = DeleteSkillCommand { skill_id: id };
    services.delete_skill.execute(command).await?;
    Ok(Json(ApiResponse::with_message(
        (),
        "Skill deleted successfully",
    )))
}
