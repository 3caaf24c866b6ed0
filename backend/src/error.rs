//! Error types for storage and the REST layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ApiErrorBody, ServiceError};
use thiserror::Error;

/// Failures of the option storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("option '{name}' does not hold valid records: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode option '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

/// Errors returned by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Service(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "service_error",
                err.to_string(),
            ),
        };

        let body = ApiErrorBody {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_becomes_service_error() {
        let decode = serde_json::from_str::<Vec<u32>>("nope").unwrap_err();
        let err = StorageError::Decode {
            name: "react_dummy_data".to_string(),
            source: decode,
        };
        match ServiceError::from(err) {
            ServiceError::Storage(msg) => assert!(msg.contains("react_dummy_data")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_status_codes() {
        let bad = ApiError::BadRequest("unknown period".to_string()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::NotFound("page".to_string()).into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let failed = ApiError::from(ServiceError::Storage("disk".to_string())).into_response();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
