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
    DeleteContactCommand, MarkContactReadCommand, SubmitContactCommand,
};
use content_queries::ListContactsQuery;
use content_responses::{ContactResponse, ContactSubmittedResponse};
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::ContentServices;

pub struct ContactHandlers;

impl ContactHandlers {
    pub fn routes() -> Router<ContentServices> {
        Router::new()
            .route("/", post(submit_contact))
            .route("/", get(list_contacts))
            .route("/{id}/read", put(mark_contact_read))
            .route("/{id}", delete(delete_contact))
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListContactsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Pass `unread=true` to hide messages already marked as read.
    pub unread: Option<String>,
}

#[utoipa::path(
    post,
    path = "/contact",
    request_body = SubmitContactCommand,
    responses(
        (status = 201, description = "Message sent successfully", body = ContactSubmittedResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "contact"
)]
#[instrument(skip_all)]
pub async fn submit_contact(
    State(services): State<ContentServices>,
    Json(command): Json<SubmitContactCommand>,
) -> Result<(StatusCode, Json<ApiResponse<ContactSubmittedResponse>>), AppError>
{
    let saved = services.submit_contact.execute(command).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            ContactSubmittedResponse { id: saved.id },
            "Message sent successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/contact",
    params(
        ListContactsParams
    ),
    responses(
        (status = 200, description = "Paginated contact inbox", body = Vec<ContactResponse>),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "contact"
)]
#[instrument(skip_all)]
pub async fn list_contacts(
    _admin: AdminUser, State(services): State<ContentServices>,
    Query(params): Query<ListContactsParams>,
) -> Result<Json<ApiResponse<Vec<ContactResponse>>>, AppError> {
    let query = ListContactsQuery {
        page: params.page,
        limit: params.limit,
        unread_only: params.unread.as_deref() == Some("true"),
    };
    let page = services.list_contacts.execute(query).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    put,
    path = "/contact/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Contact message ID")
    ),
    responses(
        (status = 200, description = "Message marked as read", body = ContactResponse),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Contact message not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "contact"
)]
#[instrument(skip_all)]
pub async fn mark_contact_read(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactResponse>>, AppError> {
    let command = MarkContactReadCommand { contact_id: id };
    let updated = services.mark_contact_read.execute(command).await?;
    Ok(Json(ApiResponse::with_message(
        updated,
        "Message marked as read",
    )))
}

#[utoipa::path(
    delete,
    path = "/contact/{id}",
    params(
        ("id" = Uuid, Path, description = "Contact message ID")
    ),
    responses(
        (status = 200, description = "Contact message deleted successfully"),
        (status = 401, description = "Authentication required", body = common_errors::ApiErrorResponse),
        (status = 403, description = "Admin access required", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Contact message not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "contact"
)]
#[instrument(skip_all)]
pub async fn delete_contact(
    _admin: AdminUser, State(services): State<ContentServices>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let command = DeleteContactCommand { contact_id: id };
    services.delete_contact.execute(command).await?;
    Ok(Json(ApiResponse::with_message(
        (),
        "Contact message deleted successfully",
    )))
}
