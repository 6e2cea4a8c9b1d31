//! Storymap — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storymap_core::error::StoryError;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// Tracing or exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `StoryError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub StoryError);

impl From<StoryError> for ApiError {
    fn from(err: StoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoryError::EmptyGraph(_)
            | StoryError::NoStartNodes(_)
            | StoryError::InvalidStartNode(_)
            | StoryError::NodeNotFound(_) => StatusCode::NOT_FOUND,
            StoryError::CycleDetected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoryError::Validation(_) => StatusCode::BAD_REQUEST,
            StoryError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
