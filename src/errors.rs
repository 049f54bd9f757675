use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;

use crate::utils::validation::collect_field_errors;

/// One failed field in a 422 response body.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Unified handler error. Validation and auth failures are produced locally
/// before any store or upstream call; persistence and generation failures are
/// converted here into opaque 500s with the detail kept server-side.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing session")]
    Unauthorized,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("snippet generation failed")]
    Generation,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(collect_field_errors(&errors))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generation | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Unauthorized => {
                HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Unauthorized" }))
            }
            ApiError::NotFound(what) => HttpResponse::NotFound()
                .json(serde_json::json!({ "error": format!("{what} not found") })),
            ApiError::Validation(errors) => HttpResponse::UnprocessableEntity().json(errors),
            ApiError::Generation => HttpResponse::InternalServerError().json(
                serde_json::json!({ "error": "Failed to generate snippet. Please try again." }),
            ),
            ApiError::Database(err) => {
                log::error!("database operation failed: {err}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Internal server error" }))
            }
        }
    }
}
