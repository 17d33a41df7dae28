//! Environment-driven server configuration.
//!
//! Everything needed to stand the service up locally has a default; only
//! `DATABASE_URL` and `JWT_SECRET` must be supplied. Bad values fail fast
//! at startup rather than limping into request handling.

use crate::auth::jwt::JwtConfig;

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address. `HOST`, default `0.0.0.0`.
    pub host: String,
    /// Bind port. `PORT`, default `8080`.
    pub port: u16,
    /// Browser origins allowed by CORS. `CORS_ORIGINS`, comma-separated,
    /// default `http://localhost:5173` (the local frontend dev server).
    pub cors_origins: Vec<String>,
    /// Per-request timeout. `REQUEST_TIMEOUT_SECS`, default `30`.
    pub request_timeout_secs: u64,
    /// Access-token signing settings.
    pub jwt: JwtConfig,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Read the configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "8080")
            .parse()
            .expect("PORT must be a port number");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a number of seconds");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
        }
    }
}
