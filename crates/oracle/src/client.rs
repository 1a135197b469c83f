//! REST client for the chat-completions endpoint.
//!
//! Each capability is one `POST /chat/completions` with a system
//! instruction, a single user turn, and an output token bound. No retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sitesmith_core::oracle::{OracleError, SiteOracle};
use sitesmith_core::revision::{
    enhance_user_prompt, generate_user_prompt, ENHANCE_MAX_TOKENS, ENHANCE_SYSTEM_PROMPT,
    GENERATE_MAX_TOKENS, GENERATE_SYSTEM_PROMPT,
};

use crate::config::OracleConfig;

/// Errors from the chat-completions HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ChatApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Chat API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<ChatApiError> for OracleError {
    fn from(err: ChatApiError) -> Self {
        match err {
            ChatApiError::Request(e) => OracleError::Transport(e.to_string()),
            ChatApiError::ApiError { status, body } => OracleError::Api { status, body },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, or an empty string when absent.
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}

/// [`SiteOracle`] backed by an OpenAI-compatible chat-completions API.
pub struct ChatCompletionsOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl ChatCompletionsOracle {
    /// Create a new oracle client.
    pub fn new(config: OracleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send one system + user exchange and return the first choice's text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, ChatApiError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed = response.json::<ChatResponse>().await?;
        Ok(parsed.into_text())
    }

    /// Ensure the response has a success status code, otherwise capture
    /// the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ChatApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ChatApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SiteOracle for ChatCompletionsOracle {
    async fn enhance_prompt(&self, message: &str) -> Result<String, OracleError> {
        let text = self
            .complete(
                ENHANCE_SYSTEM_PROMPT,
                &enhance_user_prompt(message),
                ENHANCE_MAX_TOKENS,
            )
            .await?;
        let enhanced = text.trim();
        if enhanced.is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        tracing::debug!(enhanced_len = enhanced.len(), "Prompt enhanced");
        Ok(enhanced.to_string())
    }

    async fn generate_code(
        &self,
        current_code: &str,
        instruction: &str,
    ) -> Result<String, OracleError> {
        let code = self
            .complete(
                GENERATE_SYSTEM_PROMPT,
                &generate_user_prompt(current_code, instruction),
                GENERATE_MAX_TOKENS,
            )
            .await?;
        tracing::debug!(code_len = code.len(), "Code generated");
        Ok(code)
    }
}
