//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::form::ValidationError;

/// Application errors.
///
/// `Clone` so a failure of one shared in-flight fetch can be handed to every
/// waiter of the query cache.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("failed to fetch {what}")]
    Network { what: String, reason: String },

    #[error("validation failed")]
    Validation(Vec<ValidationError>),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn network(what: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Network {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Only transport failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network { .. })
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Network { .. } => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// JSON error body.
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ValidationError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                ErrorBody {
                    error: "internal server error".to_string(),
                    fields: Vec::new(),
                }
            }
            AppError::Network { what, reason } => {
                tracing::warn!(what = %what, reason = %reason, "upstream fetch failed");
                ErrorBody {
                    error: format!("failed to fetch {what}"),
                    fields: Vec::new(),
                }
            }
            AppError::Validation(fields) => ErrorBody {
                error: "validation failed".to_string(),
                fields,
            },
            other => ErrorBody {
                error: other.to_string(),
                fields: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
