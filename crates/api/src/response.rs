//! Shared response body types for API handlers.
//!
//! Mutating endpoints answer with a `{ "message": ... }` body; read
//! endpoints use named payload keys (`project`, `projects`, `code`, ...)
//! defined next to their handlers.

use serde::Serialize;

/// Standard `{ "message": "..." }` success body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
