//! Error types of the service layer and of the HTTP boundary.
//!
//! Service functions return [`ServiceError`]. Handlers convert it into an
//! [`ApiError`] together with the public message of their endpoint; the
//! conversion logs everything that is not the caller's fault, so internal
//! details only reach the server log.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorResponse;
use log::error;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request was understood but its content is unacceptable.
    #[error("{0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("multipart error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
    /// The embedded question image could not be decoded or written.
    #[error("{0}")]
    Image(String),
}

impl ServiceError {
    /// Maps the error to the response sent for an endpoint.
    ///
    /// `context` names the failing operation in the log line and `public` is the
    /// generic message returned for internal failures.
    pub fn into_api(self, context: &str, public: &'static str) -> ApiError {
        match self {
            ServiceError::Invalid(message) => ApiError::BadRequest(message),
            ServiceError::Multipart(e) => ApiError::BadRequest(e.to_string()),
            ServiceError::Image(message) => {
                error!("{}: {}", context, message);
                ApiError::Exposed(message)
            }
            other => {
                error!("{}: {}", context, other);
                ApiError::Internal(public)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("User not logged in")]
    NotLoggedIn,
    #[error("{0}")]
    Forbidden(&'static str),
    /// Internal failure reported with a generic message.
    #[error("{0}")]
    Internal(&'static str),
    /// Internal failure whose message is meant for the caller.
    #[error("{0}")]
    Exposed(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotLoggedIn | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) | ApiError::Exposed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
