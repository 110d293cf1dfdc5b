//! Error types for the rendering service.
//!
//! Every failure that happens before the response body starts streaming is
//! translated here into an HTTP status and a JSON body. Failures after the
//! 200 status has been committed never reach this module; they are handled
//! by severing the connection (see [`crate::stream`]).

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// All errors a request can fail with before its body starts streaming.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a multipart upload at all.
    #[error("invalid multipart request: {0}")]
    InvalidContentType(#[from] MultipartRejection),

    /// Malformed multipart envelope or an unreadable part.
    #[error("error reading multipart part: {0}")]
    Multipart(#[from] MultipartError),

    /// A part whose field name is neither `option` nor `file`.
    #[error("unexpected part name: {0}")]
    UnexpectedPart(String),

    /// The per-request temporary directory could not be created.
    #[error("failed to allocate request workspace: {0}")]
    Workspace(#[source] std::io::Error),

    /// An uploaded file could not be written into the workspace.
    #[error("failed to store uploaded file '{name}': {source}")]
    Asset {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer process could not be started.
    #[error("failed to start renderer: {0}")]
    Spawn(#[source] std::io::Error),

    /// Request for a path this service does not serve.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// Request with a method this service does not serve.
    #[error("http method not allowed: {0}")]
    MethodNotAllowed(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidContentType(_)
            | ApiError::Multipart(_)
            | ApiError::UnexpectedPart(_)
            | ApiError::Asset { .. } => StatusCode::BAD_REQUEST,
            ApiError::Workspace(_) | ApiError::PathNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Spawn(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("{self}");

        let status = self.status();
        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let err = ApiError::UnexpectedPart("bogus".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let io = std::io::Error::other("disk full");
        let err = ApiError::Asset {
            name: "index.html".to_string(),
            source: io,
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_workspace_error_maps_to_not_found() {
        let io = std::io::Error::other("no temp space");
        assert_eq!(ApiError::Workspace(io).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_spawn_error_maps_to_internal_server_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such binary");
        assert_eq!(
            ApiError::Spawn(io).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            error: "Test error message".to_string(),
        };

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["error"], "Test error message");
    }

    #[test]
    fn test_into_response_carries_message() {
        let response = ApiError::PathNotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
