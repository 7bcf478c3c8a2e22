use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

pub mod response;

pub use response::{ApiResponse, Paged, Pagination};

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest {
        code: String,
        message: String,
        details: Option<String>,
    },
    Unauthorized {
        code: String,
        message: String,
        details: Option<String>,
    },
    Forbidden {
        code: String,
        message: String,
        details: Option<String>,
    },
    NotFound {
        code: String,
        message: String,
        details: Option<String>,
    },
    Conflict {
        code: String,
        message: String,
        details: Option<String>,
    },
    InternalServerError {
        code: String,
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        Self::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn bad_request_with_details(
        code: &str, message: &str, details: &str,
    ) -> Self {
        Self::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn unauthorized(code: &str, message: &str) -> Self {
        Self::Unauthorized {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn forbidden(code: &str, message: &str) -> Self {
        Self::Forbidden {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn not_found(code: &str, message: &str) -> Self {
        Self::NotFound {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        Self::Conflict {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self::InternalServerError {
            code: "INTERNAL_ERROR".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InternalServerError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn to_response_data(&self) -> ApiErrorResponse {
        let (code, message, details) = match self {
            Self::BadRequest {
                code,
                message,
                details,
            } => (code, message, details),
            Self::Unauthorized {
                code,
                message,
                details,
            } => (code, message, details),
            Self::Forbidden {
                code,
                message,
                details,
            } => (code, message, details),
            Self::NotFound {
                code,
                message,
                details,
            } => (code, message, details),
            Self::Conflict {
                code,
                message,
                details,
            } => (code, message, details),
            Self::InternalServerError {
                code,
                message,
                details,
            } => (code, message, details),
        };

        ApiErrorResponse {
            success: false,
            error: message.clone(),
            code: code.clone(),
            details: details.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest { message, .. } => write!(f, "{}", message),
            Self::Unauthorized { message, .. } => write!(f, "{}", message),
            Self::Forbidden { message, .. } => write!(f, "{}", message),
            Self::NotFound { message, .. } => write!(f, "{}", message),
            Self::Conflict { message, .. } => write!(f, "{}", message),
            Self::InternalServerError { message, .. } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let response_data = self.to_response_data();
        (status, Json(response_data)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_is_flat() {
        let error = AppError::not_found("PROJECT_NOT_FOUND", "Project not found");
        let body = error.to_response_data();
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Project not found");
        assert_eq!(json["code"], "PROJECT_NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn details_are_included_when_present() {
        let error = AppError::bad_request_with_details(
            "INVALID_QUERY_PARAMS",
            "Invalid query parameters provided",
            "limit must be a number",
        );
        let json = serde_json::to_value(error.to_response_data()).unwrap();

        assert_eq!(json["details"], "limit must be a number");
    }

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(
            AppError::unauthorized("MISSING_TOKEN", "x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("INVALID_TOKEN", "x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::conflict("SLUG_TAKEN", "x").status_code(),
            StatusCode::CONFLICT
        );
    }
}
