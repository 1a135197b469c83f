//! Contract for the external text-generation oracle.
//!
//! The revision workflow needs two single-shot capabilities: rewriting a
//! change request into a precise instruction, and rewriting a full HTML
//! document according to that instruction. Implementations live outside
//! this crate (an HTTP client in production, scripted fakes in tests).

use async_trait::async_trait;

/// Failure reported by an oracle implementation.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The oracle could not be reached or the transport failed.
    #[error("Oracle transport error: {0}")]
    Transport(String),

    /// The oracle answered with a non-success status.
    #[error("Oracle returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The oracle answered but produced no usable text.
    #[error("Oracle returned an empty response")]
    EmptyResponse,
}

/// Text-generation capabilities used by the revision workflow.
///
/// Object-safe so the API state can hold an `Arc<dyn SiteOracle>`.
#[async_trait]
pub trait SiteOracle: Send + Sync {
    /// Rewrite a raw change request into a concise, specific instruction.
    async fn enhance_prompt(&self, message: &str) -> Result<String, OracleError>;

    /// Produce a complete replacement HTML document.
    ///
    /// May return an empty string; the caller treats that as a failed
    /// generation rather than a transport error.
    async fn generate_code(
        &self,
        current_code: &str,
        instruction: &str,
    ) -> Result<String, OracleError>;
}
