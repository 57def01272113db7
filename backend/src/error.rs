use crate::store::StoreError;
use actix_web::error::QueryPayloadError;
use actix_web::http::StatusCode;
use common::error::ValidationError;
use thiserror::Error;

/// Why a request to the defect handler stopped before its primary action finished.
///
/// Validation problems and store failures are both terminal for the request
/// and are shown to the user with their original message; nothing is retried.
#[derive(Debug, Error)]
pub enum DefectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("The page address could not be read: {0}")]
    MalformedQuery(#[from] QueryPayloadError),
    #[error("The submitted form could not be read: {0}")]
    MalformedForm(#[from] serde_urlencoded::de::Error),
    #[error("The request body is not valid JSON: {0}")]
    MalformedRequest(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DefectError {
    pub fn status(&self) -> StatusCode {
        match self {
            DefectError::Validation(_)
            | DefectError::MalformedQuery(_)
            | DefectError::MalformedForm(_)
            | DefectError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            DefectError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            DefectError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
