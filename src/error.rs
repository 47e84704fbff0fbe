use thiserror::Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors raised by the configuration store and the calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing `id`, illegal page size, or a config the calculator cannot page with
    #[error("invalid pagination config: {0}")]
    InvalidConfig(String),
    /// Content is not a sequence, or config is not a mapping
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Make our own error that wraps `anyhow::Error`.
#[derive(Error, Debug)]
pub enum HttpErr {
    /// a generic error
    #[error("generic")]
    Err(#[from] anyhow::Error),
    /// io error
    #[error("io")]
    Io(#[from] std::io::Error),
    /// A rejected pagination precondition
    #[error("pagination")]
    Pagination(#[from] Error),
    /// An http status
    #[error("status code")]
    Status(StatusCode),
}

// Tell axum how to convert `HttpErr` into a response.
impl IntoResponse for HttpErr {
    fn into_response(self) -> Response {
        match self {
            Self::Err(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Something went wrong: {e}"))
                    .into_response()
            }
            Self::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("IO: {e}")).into_response(),
            Self::Pagination(e @ Error::InvalidConfig(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            Self::Pagination(e @ Error::TypeMismatch(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            Self::Status(sc) => sc.into_response(),
        }
    }
}

// This enables using `?` on functions that return `Result<_, StatusCode>` to turn them into
// `Result<_, HttpErr>`. That way you don't need to do that manually.
impl From<StatusCode> for HttpErr {
    fn from(sc: StatusCode) -> Self {
        Self::Status(sc)
    }
}
