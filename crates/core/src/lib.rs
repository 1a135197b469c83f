//! Domain logic for sitesmith: revision rules, conversation roles, the
//! text-generation oracle contract, and billing webhook verification.
//!
//! Has no database or HTTP dependencies so it can be shared by the
//! repository layer, the oracle client, and the API server.

pub mod billing;
pub mod conversation;
pub mod error;
pub mod oracle;
pub mod revision;
pub mod types;
