use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use wallet_ai::AiError;
use wallet_core::errors::{Error as CoreError, ErrorKind};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Ai(#[from] AiError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Chat assistant is not configured")]
    ChatDisabled,
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    kind: &'static str,
    message: String,
}

fn core_status(e: &CoreError) -> (StatusCode, &'static str) {
    match e.kind() {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Upstream => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM"),
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(e) => core_status(e),
            ApiError::Ai(e) => match e {
                AiError::Core(core) => core_status(core),
                AiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, e.code()),
                AiError::MissingApiKey(_) => (StatusCode::SERVICE_UNAVAILABLE, e.code()),
                AiError::Provider(_) | AiError::ToolExecutionFailed(_) => {
                    (StatusCode::BAD_GATEWAY, e.code())
                }
                AiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.code()),
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::ChatDisabled => (StatusCode::SERVICE_UNAVAILABLE, "CHAT_DISABLED"),
            ApiError::Internal(_) | ApiError::Anyhow(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            kind,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
