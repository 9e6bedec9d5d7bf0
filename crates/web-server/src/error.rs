use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DbError),
    #[error("Invalid document: {0}")]
    Validation(#[from] core_types::CoreError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    pub fn document_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Document {id} not found"))
    }
}

/// Lifts storage failures into the API taxonomy. A collision on `type`
/// becomes a conflict; everything else stays an internal error.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(doc_type) => {
                AppError::Conflict(format!("A document with type '{doc_type}' already exists"))
            }
            DbError::NotFound => AppError::NotFound("Document not found".to_string()),
            other => AppError::Database(other),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Conflict(message) => {
                tracing::warn!(%message, "Rejected conflicting write.");
                (StatusCode::CONFLICT, message)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = AppError::from(DbError::UniqueViolation("invoice".to_string()));
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("invoice")));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            AppError::document_not_found(4).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database(DbError::ConnectionConfigError("x".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let invalid = core_types::CoreError::InvalidInput("type".into(), "empty".into());
        assert_eq!(
            AppError::from(invalid).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
