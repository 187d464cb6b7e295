//! The HTTP seam: send a form-encoded POST, get the status and body back.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::Result;

use super::config::ClientConfig;

/// Form-encoded request body. Ordered so requests are reproducible.
pub type FormFields = BTreeMap<String, String>;

/// What came back from the service: status code and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl TransportResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can POST a form and return the raw response.
///
/// [`ReqwestTransport`] is the production implementation. Tests swap in
/// their own to script responses and observe call order.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `form` to `url` and return the response status and body.
    ///
    /// Implementations return `Ok` for any response the service produced,
    /// whatever its status; `Err` is reserved for failures where no
    /// response exists.
    async fn post_form(&self, url: &str, form: &FormFields) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport using the timeout and user agent from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(&self, url: &str, form: &FormFields) -> Result<TransportResponse> {
        let response = self.http.post(url).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse::new(status, body))
    }
}
