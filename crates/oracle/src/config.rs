/// Default OpenAI-compatible endpoint.
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier.
const DEFAULT_MODEL: &str = "z-ai/glm-4.5-air:free";

/// Connection settings for the text-generation oracle.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL without a trailing slash, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: String,
    /// Bearer token sent in the `Authorization` header.
    pub api_key: String,
    /// Model identifier passed through to the endpoint.
    pub model: String,
}

impl OracleConfig {
    /// Load oracle configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                        |
    /// |-------------------|----------|--------------------------------|
    /// | `ORACLE_API_KEY`  | **yes**  | --                             |
    /// | `ORACLE_BASE_URL` | no       | `https://openrouter.ai/api/v1` |
    /// | `ORACLE_MODEL`    | no       | `z-ai/glm-4.5-air:free`        |
    ///
    /// # Panics
    ///
    /// Panics if `ORACLE_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("ORACLE_API_KEY").expect("ORACLE_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "ORACLE_API_KEY must not be empty");

        let base_url = std::env::var("ORACLE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("ORACLE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        Self {
            base_url,
            api_key,
            model,
        }
    }
}
