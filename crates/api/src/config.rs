use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`; oracle calls are slow).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes (default: 50 MiB).
    pub body_limit_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Shared secret for verifying payment webhook signatures.
    pub billing_webhook_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                                       |
    /// |--------------------------|-----------------------------------------------|
    /// | `HOST`                   | `0.0.0.0`                                     |
    /// | `PORT`                   | `3000`                                        |
    /// | `CORS_ORIGINS`           | `http://localhost:5173,http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`   | `300`                                         |
    /// | `BODY_LIMIT_BYTES`       | `52428800`                                    |
    /// | `BILLING_WEBHOOK_SECRET` | required                                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let body_limit_bytes: usize = std::env::var("BODY_LIMIT_BYTES")
            .unwrap_or_else(|_| (50 * 1024 * 1024).to_string())
            .parse()
            .expect("BODY_LIMIT_BYTES must be a valid usize");

        let billing_webhook_secret = std::env::var("BILLING_WEBHOOK_SECRET")
            .expect("BILLING_WEBHOOK_SECRET must be set in the environment");
        assert!(
            !billing_webhook_secret.is_empty(),
            "BILLING_WEBHOOK_SECRET must not be empty"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            body_limit_bytes,
            jwt,
            billing_webhook_secret,
        }
    }
}
