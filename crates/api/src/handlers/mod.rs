pub mod billing;
pub mod project;
pub mod revision;
pub mod user;
