//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that may run inside a caller's transaction accept any
//! `PgExecutor`; the rest take `&PgPool`.

pub mod conversation_repo;
pub mod credit_event_repo;
pub mod project_repo;
pub mod user_repo;
pub mod version_repo;

pub use conversation_repo::ConversationRepo;
pub use credit_event_repo::{CreditEventRepo, TopUpOutcome};
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
pub use version_repo::VersionRepo;
