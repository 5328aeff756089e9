use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use importer::ImporterError;
use serde::Serialize;
use std::fmt;
use storage::error::StorageError;
use storage::services::review::ReviewError;
use validator::ValidationErrors;

use crate::blob::BlobError;

/// Body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    #[schema(example = "Validation failed")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl WebError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Authentication required".to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(e) if e.is_conflict() => StatusCode::CONFLICT,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorBody {
        let mut details = None;

        let message = match self {
            Self::Storage(StorageError::NotFound) => "Resource not found".to_string(),
            Self::Storage(StorageError::Conflict(msg))
            | Self::Storage(StorageError::ConstraintViolation(msg)) => msg,
            Self::Storage(e) if e.is_unique_violation() => "Resource already exists".to_string(),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "An internal error occurred".to_string()
            }
            Self::Validation(errors) => {
                details = Some(field_messages(&errors));
                "Validation failed".to_string()
            }
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => msg,
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                "An internal error occurred".to_string()
            }
        };

        ErrorBody {
            success: false,
            message,
            details,
        }
    }
}

fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();
    messages.sort();
    messages
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        (status_code, Json(self.body())).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<ReviewError> for WebError {
    fn from(error: ReviewError) -> Self {
        match error {
            ReviewError::InvalidStatus(e) => Self::BadRequest(e.to_string()),
            ReviewError::Storage(e) => Self::Storage(e),
        }
    }
}

impl From<ImporterError> for WebError {
    fn from(error: ImporterError) -> Self {
        match error {
            ImporterError::ParseError(msg) => Self::BadRequest(msg),
            ImporterError::StorageError(e) => Self::Storage(e),
            ImporterError::DatabaseError(e) => Self::Storage(StorageError::Database(e)),
        }
    }
}

impl From<BlobError> for WebError {
    fn from(error: BlobError) -> Self {
        Self::InternalServerError(format!("Blob store: {error}"))
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebError::from(StorageError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::from(StorageError::Conflict("taken".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::from(StorageError::ConstraintViolation("missing".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(WebError::unauthorized().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            WebError::Forbidden("no".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_invalid_status_is_bad_request() {
        let err: WebError = "bogus"
            .parse::<storage::models::ApplicationStatus>()
            .map_err(ReviewError::from)
            .unwrap_err()
            .into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.body().message.contains("bogus"));
    }

    #[test]
    fn test_import_parse_error_is_bad_request() {
        let err = WebError::from(ImporterError::ParseError("row 2: cnic is missing".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_details() {
        let errors = Probe { name: "ab".into() }.validate().unwrap_err();
        let body = WebError::from(errors).body();

        assert!(!body.success);
        assert_eq!(body.message, "Validation failed");
        assert_eq!(body.details, Some(vec!["name: too short".to_string()]));
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let body = WebError::InternalServerError("db password leaked".into()).body();
        assert_eq!(body.message, "An internal error occurred");
    }
}
