//! API error taxonomy and its HTTP mapping.
//!
//! Every error answers `{ "message": ... }`. Store faults are logged here and
//! reach the client only as a generic "Server error".

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use notes_types::MessageResponse;

use crate::db::StoreError;

pub const MSG_CREATE_REQUIRED: &str = "Title and Content are required";
pub const MSG_TITLE_EMPTY: &str = "Title cannot be empty";
pub const MSG_CONTENT_EMPTY: &str = "Content cannot be empty";
pub const MSG_INVALID_ID: &str = "Invalid ID";
pub const MSG_NOT_FOUND: &str = "Note not found";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_SERVER_ERROR: &str = "Server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{}", MSG_INVALID_ID)]
    InvalidId,
    #[error("{}", MSG_NOT_FOUND)]
    NotFound,
    #[error("{}", MSG_INVALID_BODY)]
    InvalidBody,
    #[error("{}", MSG_SERVER_ERROR)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            // The record vanished between lookup and save (concurrent delete).
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Store(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId | ApiError::InvalidBody => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Store(e) = self {
            log::error!("[NOTES] Store failure: {}", e);
        }
        HttpResponse::build(self.status_code()).json(MessageResponse::new(self.to_string()))
    }
}
