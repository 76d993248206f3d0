/*
 * Responsibility
 * - AppError: the single error type returned by handlers, extractors and middleware
 * - IntoResponse: every failure leaves the service as the ErrorResponse envelope
 * - Conversions from auth failures, extractor rejections and repo errors
 *
 * Server-side failures are logged with their internal detail here and exposed
 * only as a generic code + message.
 */
pub mod code;
pub mod response;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub use code::ErrorCode;
pub use response::{ErrorResponse, FieldError};

use crate::repos::error::RepoError;
use crate::services::auth::AuthFailure;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", .0.message())]
    Code(ErrorCode),
    #[error("{}: {detail}", .code.message())]
    Detailed { code: ErrorCode, detail: String },
    #[error("invalid input ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("authentication failure: {0}")]
    Auth(AuthFailure),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn detailed(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Detailed {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Code(code) | AppError::Detailed { code, .. } => *code,
            AppError::Validation(_) => ErrorCode::InvalidInputValue,
            AppError::Auth(failure) => failure.error_code(),
            AppError::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.status();

        if status.is_server_error() {
            tracing::error!(code = code.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = code.code(), error = %self, "request rejected");
        }

        let body = match self {
            AppError::Detailed { code, detail } if !status.is_server_error() => {
                ErrorResponse::with_detail(code, detail)
            }
            AppError::Validation(errors) => ErrorResponse::with_errors(code, errors),
            _ => ErrorResponse::of(code),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        AppError::Code(code)
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        AppError::Auth(failure)
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(err) => AppError::internal(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::Code(ErrorCode::PayloadTooLarge);
        }

        match rejection {
            JsonRejection::MissingJsonContentType(_) => AppError::detailed(
                ErrorCode::UnsupportedMediaType,
                "expected a request with `Content-Type: application/json`",
            ),
            JsonRejection::JsonDataError(e) => {
                AppError::detailed(ErrorCode::InvalidInputValue, e.body_text())
            }
            JsonRejection::JsonSyntaxError(_) | JsonRejection::BytesRejection(_) => {
                AppError::detailed(
                    ErrorCode::InvalidInputValue,
                    "the request body is malformed or empty",
                )
            }
            other => AppError::detailed(ErrorCode::InvalidInputValue, other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => {
                AppError::detailed(ErrorCode::InvalidInputValue, e.body_text())
            }
            // route/handler mismatch: a wiring bug, not client input
            other => AppError::Internal(other.body_text()),
        }
    }
}

/// Router fallback for unknown paths.
pub async fn endpoint_not_found() -> AppError {
    AppError::Code(ErrorCode::EndpointNotFound)
}

/// Router fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::Code(ErrorCode::MethodNotAllowed)
}
