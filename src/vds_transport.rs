//! VDS HTTP transport.
//!
//! Unique responsibility: execute one authenticated HTTP call against the VDS API
//! and classify the outcome by status code.
//!
//! Every request carries:
//! - Header: Authorization: Bearer <token>
//! - Header: Content-Type: application/json
//!
//! A non-2xx response is a failure, but its body is kept on the error so that
//! callers can decode the service's error description from it.

use std::{env, fmt};

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.example.com/v2";

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "vds-provider/0.1";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "VDS_API_TOKEN";

/// Credential and endpoint context for the VDS API.
///
/// Immutable once the transport is built.
#[derive(Clone)]
pub struct VdsClientConfig {
    /// Bearer token for authentication.
    /// Env: `VDS_API_TOKEN` (required)
    pub token: String,

    /// Base URL of the API.
    /// Env: `VDS_ENDPOINT` (default: "<https://api.example.com/v2>")
    pub endpoint: String,

    /// User agent for HTTP requests.
    /// Env: `VDS_USER_AGENT` (default: "vds-provider/0.1")
    pub user_agent: String,
}

impl VdsClientConfig {
    /// Build a configuration from a token and an optional endpoint override.
    ///
    /// An empty endpoint falls back to [`DEFAULT_ENDPOINT`].
    #[must_use]
    pub fn new(token: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: endpoint
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// In local dev, this will also attempt to load `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `VDS_API_TOKEN` is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let token = env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingEnv(TOKEN_ENV))?;

        let mut cfg = Self::new(token, env::var("VDS_ENDPOINT").ok());
        if let Ok(ua) = env::var("VDS_USER_AGENT")
            && !ua.trim().is_empty()
        {
            cfg.user_agent = ua;
        }
        Ok(cfg)
    }

    /// Build the absolute URL for a path relative to the endpoint.
    #[inline]
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for VdsClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VdsClientConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// HTTP verbs understood by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT. Defined for completeness; the API is never mutated in place, so
    /// the transport refuses it.
    Put,
    /// DELETE.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Raw successful response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code (always 2xx).
    pub status: reqwest::StatusCode,
    /// Response body as text (may be empty).
    pub body: String,
}

/// Transport-level failure.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure, malformed request, or a body cut short.
    #[error("http error: {0}")]
    Request(#[source] reqwest::Error),
    /// Non-2xx response. The raw body is kept for error decoding.
    #[error("api request failed with status: {status}")]
    Status {
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Response body.
        body: String,
    },
    /// The verb is not enabled on this transport.
    #[error("http method {0} is disabled")]
    MethodDisabled(HttpMethod),
}

impl TransportError {
    /// Raw response body of a failed call, when the server answered.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            Self::Request(_) | Self::MethodDisabled(_) => None,
        }
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("missing required env var: {0}")]
    MissingEnv(&'static str),
}

/// Authenticated HTTP transport for the VDS API.
///
/// Stateless per call; safe to share between resources.
pub struct VdsTransport {
    cfg: VdsClientConfig,
    http: reqwest::Client,
}

impl VdsTransport {
    /// Create a new transport from the given configuration.
    ///
    /// No timeout is configured beyond the HTTP client's default.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(cfg: VdsClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(TransportError::Request)?;

        Ok(Self { cfg, http })
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub const fn config(&self) -> &VdsClientConfig {
        &self.cfg
    }

    /// Execute a single request.
    ///
    /// `path` is relative to the configured endpoint and starts with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Status`] with the raw body for any status
    /// outside `[200, 300)`, [`TransportError::Request`] if the call could not
    /// be made, and [`TransportError::MethodDisabled`] for PUT.
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, TransportError> {
        let verb = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Put => return Err(TransportError::MethodDisabled(method)),
        };

        let url = self.cfg.url_for(path);
        tracing::debug!(%method, %url, "sending request");

        let mut req = self
            .http
            .request(verb, &url)
            .bearer_auth(&self.cfg.token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(bytes) = body {
            req = req.body(bytes);
        }

        let resp = req.send().await.map_err(TransportError::Request)?;

        let status = resp.status();
        let body = resp.text().await.map_err(TransportError::Request)?;

        if !status.is_success() {
            tracing::debug!(%method, %url, %status, "request failed");
            return Err(TransportError::Status { status, body });
        }

        Ok(RawResponse { status, body })
    }
}
