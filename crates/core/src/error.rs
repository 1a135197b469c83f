use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Not-found with a caller-facing message, used where the response
    /// must not reveal which id (or whose row) was missing.
    #[error("Not found: {0}")]
    NotFoundMessage(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient credits: {required} required, {available} available")]
    InsufficientCredits { required: i32, available: i32 },
}
