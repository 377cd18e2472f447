use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use podium_storage::error::StorageError;
use podium_storage::services::reconcile::SubmitError;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    NotFound,
    PermissionDenied(String),
    SubmissionInFlight,
    /// Some pick batches were written before one failed
    PartialWrite {
        batch: usize,
        batches: usize,
        attempted: usize,
        created: usize,
        updated: usize,
        source: StorageError,
    },
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "Resource not found"),
            Self::PermissionDenied(reason) => write!(f, "Permission denied: {}", reason),
            Self::SubmissionInFlight => write!(f, "A submission is already in progress"),
            Self::PartialWrite {
                batch,
                batches,
                source,
                ..
            } => write!(f, "Batch {}/{} failed: {}", batch, batches, source),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::SubmissionInFlight => StatusCode::CONFLICT,
            Self::PartialWrite { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
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

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
            Self::NotFound => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::PermissionDenied(reason) => {
                json!({
                    "error": "Permission denied",
                    "reason": reason
                })
            }
            Self::SubmissionInFlight => {
                json!({
                    "error": "A submission for this player is already in progress"
                })
            }
            Self::PartialWrite {
                batch,
                batches,
                attempted,
                created,
                updated,
                source,
            } => {
                tracing::error!(batch, batches, "Pick batch write failed: {:?}", source);
                json!({
                    "error": "Picks were only partially saved",
                    "failed_batch": batch,
                    "batches": batches,
                    "attempted": attempted,
                    "created": created,
                    "updated": updated
                })
            }
        };

        (status_code, Json(body)).into_response()
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

impl From<SubmitError> for WebError {
    fn from(error: SubmitError) -> Self {
        match error {
            SubmitError::PermissionDenied { reason } => Self::PermissionDenied(reason),
            SubmitError::PermissionCheck(source) => Self::Storage(source),
            SubmitError::CreateBatchFailed {
                batch,
                batches,
                attempted,
                created,
                source,
            } => Self::PartialWrite {
                batch,
                batches,
                attempted,
                created,
                updated: 0,
                source,
            },
            SubmitError::UpdateBatchFailed {
                batch,
                batches,
                attempted,
                created,
                updated,
                source,
            } => Self::PartialWrite {
                batch,
                batches,
                attempted,
                created,
                updated,
                source,
            },
        }
    }
}

pub type ApiResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_errors_map_to_status_codes() {
        let denied: WebError = SubmitError::PermissionDenied {
            reason: "Player does not exist".to_string(),
        }
        .into();
        assert_eq!(denied.into_response().status(), StatusCode::FORBIDDEN);

        let partial: WebError = SubmitError::CreateBatchFailed {
            batch: 2,
            batches: 3,
            attempted: 50,
            created: 50,
            source: StorageError::NotFound,
        }
        .into();
        assert!(matches!(
            partial,
            WebError::PartialWrite {
                batch: 2,
                created: 50,
                updated: 0,
                ..
            }
        ));
        assert_eq!(partial.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_storage_errors_map_to_status_codes() {
        assert_eq!(
            WebError::from(StorageError::NotFound).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::from(StorageError::ConstraintViolation("dup".to_string()))
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::SubmissionInFlight.into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
