//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use reviewbot_core::{DomainError, ErrorCode};
use serde::Serialize;
use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {source}")]
    IoError { source: std::io::Error },

    #[error("Could not build metrics handler: {message}")]
    MetricsError { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Request deadline exceeded")]
    Timeout,

    #[error(transparent)]
    DomainError {
        #[from]
        source: DomainError,
    },
}

impl ServerError {
    /// Machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
            Self::DomainError { source } => source.code(),
            Self::IoError { .. } | Self::MetricsError { .. } | Self::Timeout => {
                ErrorCode::Internal
            }
        }
    }
}

/// HTTP status of an error code.
pub fn status_for_code(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::TeamExists | ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::PullRequestExists
        | ErrorCode::PullRequestMerged
        | ErrorCode::NotAssigned
        | ErrorCode::NoCandidate => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: &'a str,
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        status_for_code(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.code();

        // Storage details stay in the logs
        let message = match code {
            ErrorCode::Internal => {
                tracing::error!(error = %self, message = "Internal error");
                "internal error".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: ErrorBody {
                code: code.as_str(),
                message: &message,
            },
        })
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
