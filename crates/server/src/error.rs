use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: max {0}MB allowed")]
    PayloadTooLarge(usize),

    #[error("Not found")]
    NotFound,

    #[error("Request timeout")]
    Timeout,

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] emotext::PipelineError),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::Pipeline(_)
            | ServerError::Render(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ServerError::NotFound => "NOT_FOUND",
            ServerError::Timeout => "REQUEST_TIMEOUT",
            ServerError::Pipeline(_) => "PIPELINE_ERROR",
            ServerError::Render(_) => "RENDER_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Map an extractor rejection; body-limit overruns keep their 413.
    pub fn from_rejection(status: StatusCode, message: String, max_body_size_mb: usize) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(max_body_size_mb)
        } else {
            ServerError::BadRequest(message)
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
        } else {
            tracing::debug!(code, error = %self, "request rejected");
        }
        metrics::counter!(crate::telemetry::REQUEST_ERRORS_TOTAL, "code" => code).increment(1);

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<emotext::ClassifierError> for ServerError {
    fn from(err: emotext::ClassifierError) -> Self {
        ServerError::Pipeline(err.into())
    }
}
