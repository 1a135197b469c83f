//! HTTP client for an OpenAI-compatible chat-completions endpoint.
//!
//! Implements [`sitesmith_core::oracle::SiteOracle`] so the revision
//! workflow can enhance prompts and regenerate HTML documents.

pub mod client;
pub mod config;

pub use client::ChatCompletionsOracle;
pub use config::OracleConfig;
