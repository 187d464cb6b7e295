//! Client configuration options.

use std::time::Duration;

use url::Url;

use crate::{Environment, Error, Result};

/// Minutes a freshly issued cobrand or user token is trusted for.
pub const TOKEN_LIFETIME_MINUTES: i64 = 20;

/// Configuration for the Yodlee client.
///
/// # Example
///
/// ```
/// use yodlee_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Replaces the environment's base URL (mock servers, proxies)
    pub base_url: Option<String>,
    /// How long an issued token is considered valid
    pub token_lifetime: chrono::Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("yodlee-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            base_url: None,
            token_lifetime: chrono::Duration::minutes(TOKEN_LIFETIME_MINUTES),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Send requests to `base_url` instead of the environment's URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set how long issued tokens are trusted.
    pub fn with_token_lifetime(mut self, lifetime: chrono::Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Compute the base URL endpoint paths are appended to.
    ///
    /// Uses the override when set, otherwise the environment's URL
    /// (templated with the cobrand username for the sandbox). The result
    /// always ends with `/`.
    pub fn resolve_base_url(&self, env: Environment, cobrand_username: &str) -> Result<String> {
        let raw = match &self.base_url {
            Some(url) => url.clone(),
            None => env.api_base_url(cobrand_username)?,
        };

        let mut url = Url::parse(&raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("Not a usable base URL: {}", raw)));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url.to_string())
    }
}
