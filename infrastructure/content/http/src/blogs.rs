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
    CreateBlogCommand, DeleteBlogCommand, UpdateBlogCommand,
};
use content_queries::{GetBlogBySlugQuery, ListBlogsQuery};
use content_responses::{BlogListItemResponse, BlogResponse};
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{ContentServices, tracking::dispatch_view};

pub struct BlogHandlers;

impl BlogHandlers {
    /// The item routes share one parameter spelling; the public read treats
    /// it as a slug while update and delete parse it as an id.
    pub fn routes() -> Router<ContentServices> {
        Router::new()
            .route("/", get(list_blogs))
            .route("/", post(create_blog))
            .route("/{slug}", get(get_blog))
            .route("/{slug}", put(update_blog))
            .route("/{slug}", delete(delete_blog))
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListBlogsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Admin-only filter; `published=true` restricts the listing to
    /// published posts. Anonymous callers always get published posts only.
    pub published: Option<String>,
}

#[utoipa::path(
    get,
    path = "/blogs",
    params(
        ListBlogsParams
    ),
    responses(
        (status = 200, description = "Paginated blog listing", body = Vec<BlogListItemResponse>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "blogs"
)]
#[instrument(skip_all)]
pub async fn list_blogs(
    admin: Option<AdminUser>, State(services): State<ContentServices>,
    Query(params): Query<ListBlogsParams>,
) -> Result<Json<ApiResponse<Vec<BlogListItemResponse>>>, AppError> {
    let published_only = match admin {
        Some(_) => params.published.as_deref() == Some("true"),
        None => true,
    };
    let query = ListBlogsQuery {
        page: params.page,
        limit: params.limit,
        published_only,
    };
    let page = services.list_blogs.execute(query).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/blogs/{slug}",
    params(
        ("slug" = String, Path, description = "Blog post slug")
    ),
    responses(
        (status = 200, description = "Blog post found", body = BlogResponse),
        (status = 404, description = "Blog post not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "blogs"
)]
#[instrument(skip_all)]
pub async fn get_blog(
    admin: Option<AdminUser>, State(services): State<ContentServices>,
    Path(slug): Path<String>, headers: HeaderMap,
) -> Result<Json<ApiResponse<BlogResponse>>, AppError> {
    let query = GetBlogBySlugQuery {
        slug,
        allow_unpublished: admin.is_some(),
    };
    let blog = services.get_blog_by_slug.execute(query).await?;

    dispatch_view(&services.track_view, ViewTarget::Blog(blog.id), &headers);

    Ok(Json(ApiResponse::new(blog)))
}

#[utoipa::path(
    post,
    path = "/blogs",
    request_body = CreateBlogCommand,
    responses(
        (status = 201, description = "Blog post created successfully", body = BlogResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 409, description = "Slug already in use", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "blogs"
)]
#[instrument(skip_all)]
pub async fn create_blog(
    _admin: AdminUser, State(services): State<ContentServices>,
    Json(command): Json<CreateBlogCommand>,
) -> Result<(StatusCode, Json<ApiResponse<BlogResponse>>), AppError> {
    let created = services.create_blog.execute(command).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            created,
            "Blog post created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/blogs/{id}",
    request_body = UpdateBlogCommand,
    params(
        ("id" = Uuid, Path, description = "Blog post ID")
    ),
    responses(
        (status = 200, description = "Blog post updated successfully", body = BlogResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Blog post not found", body = common_errors::ApiErrorResponse),
        (status = 409, description = "Slug already in use", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "blogs"
)]
#[instrument(skip_all)]
pub async fn update_blog(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>, Json(command): Json<UpdateBlogCommand>,
) -> Result<Json<ApiResponse<BlogResponse>>, AppError> {
    let updated = services.update_blog.execute(id, command).await?;
    Ok(Json(ApiResponse::with_message(
        updated,
        "Blog post updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Blog post ID")
    ),
    responses(
        (status = 200, description = "Blog post deleted successfully"),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Blog post not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "blogs"
)]
#[instrument(skip_all)]
pub async fn delete_blog(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let command = DeleteBlogCommand { blog_id: id };
    services.delete_blog.execute(command).await?;
    Ok(Json(ApiResponse::with_message(
        (),
        "Blog post deleted successfully",
    )))
}
