use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Too many requests: {0}")]
    RateLimited(String),

    /// An uploaded file could not be decoded or re-encoded.
    #[error("Unprocessable media: {0}")]
    Media(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
