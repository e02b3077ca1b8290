use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// HTTP-facing error taxonomy. Every variant renders as a plain-text body:
/// validation failures as 400, missing records as 404, store failures as
/// 500 carrying the raw error message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Store(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::Validation(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Db(msg) => Self::Store(msg),
            ServiceError::Model(err) => match err {
                models::errors::ModelError::Validation(msg) => Self::Validation(msg),
                models::errors::ModelError::Db(msg) => Self::Store(msg),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Store(msg) => {
                error!(error = %msg, "store error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, msg).into_response()
    }
}
