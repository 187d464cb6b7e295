//! HTTP client implementation for the Yodlee API.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::Value;

use crate::api::{RegistrationService, SiteAccountsService, TransactionsService};
use crate::auth::{InitOptions, Session, UserCredentials};
use crate::error::service_error;
use crate::{Error, Result};

use super::config::ClientConfig;

/// Longest slice of a non-JSON error body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 200;
use super::transport::{FormFields, ReqwestTransport, Transport};

/// The main client for interacting with the Yodlee API.
///
/// The client owns a [`Session`] and hands out one service struct per
/// endpoint family. Every service call resolves the tokens it needs
/// through the session first, logging in again when they have expired.
///
/// # Example
///
/// ```no_run
/// use yodlee_rs::{YodleeClient, InitOptions, UserCredentials};
///
/// # async fn example() -> yodlee_rs::Result<()> {
/// let client = YodleeClient::initialize(InitOptions::new("sbCobacme", "cobrand-pass")).await?;
///
/// let user = UserCredentials::new("sbMemacme1", "user-pass")?;
/// let accounts = client.site_accounts().list(Some(&user)).await?;
/// println!("{}", accounts);
/// # Ok(())
/// # }
/// ```
pub struct YodleeClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

impl YodleeClient {
    /// Initialize a client with the default configuration.
    ///
    /// Performs a cobrand login unless `options` carries a full set of
    /// pre-seeded tokens.
    pub async fn initialize(options: InitOptions) -> Result<Self> {
        Self::initialize_with_config(options, ClientConfig::default()).await
    }

    /// Initialize a client with custom configuration.
    pub async fn initialize_with_config(options: InitOptions, config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Self::initialize_with_transport(options, config, transport).await
    }

    /// Initialize a client that sends requests through `transport`.
    pub async fn initialize_with_transport(
        options: InitOptions,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let session = Session::initialize(options, &config, transport).await?;
        Ok(Self::with_session(session, config))
    }

    /// Create a client around an existing session.
    pub fn with_session(session: Session, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner { session, config }),
        }
    }

    /// Get the site accounts service.
    pub fn site_accounts(&self) -> SiteAccountsService {
        SiteAccountsService::new(self.inner.clone())
    }

    /// Get the transactions service.
    pub fn transactions(&self) -> TransactionsService {
        TransactionsService::new(self.inner.clone())
    }

    /// Get the user registration service.
    pub fn registration(&self) -> RegistrationService {
        RegistrationService::new(self.inner.clone())
    }

    /// Log an end user in, replacing any cached user token.
    pub async fn login_user(&self, credentials: &UserCredentials) -> Result<()> {
        self.inner.session.user_login(credentials).await.map(|_| ())
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// POST to an endpoint that only needs the cobrand token.
    pub(crate) async fn post_with_cobrand(&self, path: &str, mut form: FormFields) -> Result<Value> {
        let cob_token = self.session.cobrand_token().await?;
        form.insert("cobSessionToken".to_string(), cob_token.expose_secret().to_string());

        self.session
            .requester()
            .post(path, &form)
            .await
            .map_err(Error::into_api)
    }

    /// POST to an endpoint that needs both the cobrand and user tokens.
    pub(crate) async fn post_with_user(
        &self,
        path: &str,
        mut form: FormFields,
        credentials: Option<&UserCredentials>,
    ) -> Result<Value> {
        let tokens = self.session.tokens(credentials).await?;
        form.insert("cobSessionToken".to_string(), tokens.cobrand.expose_secret().to_string());
        form.insert("userSessionToken".to_string(), tokens.user.expose_secret().to_string());

        self.session
            .requester()
            .post(path, &form)
            .await
            .map_err(Error::into_api)
    }
}

/// Sends requests relative to the session's base URL and checks the
/// response body for service-reported errors.
#[derive(Clone)]
pub(crate) struct Requester {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl Requester {
    pub(crate) fn new(transport: Arc<dyn Transport>, base_url: String) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `form` to `path` and return the parsed body.
    ///
    /// A 2xx body that isn't JSON is a [`Error::Protocol`]. A body
    /// carrying either service error shape, or any JSON body sent with a
    /// non-2xx status, is an [`Error::Api`] holding the body. A non-2xx
    /// response without a JSON body is an [`Error::Transport`].
    pub(crate) async fn post(&self, path: &str, form: &FormFields) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%path, "POST");

        let response = self.transport.post_form(&url, form).await?;
        let value: Value = match serde_json::from_str(&response.body) {
            Ok(value) => value,
            Err(e) if response.is_success() => {
                return Err(Error::Protocol(format!(
                    "{} returned a body that is not JSON: {}",
                    path, e
                )));
            }
            Err(_) => {
                let snippet: String = response.body.chars().take(MAX_ERROR_BODY_CHARS).collect();
                tracing::warn!(%path, status = response.status, "request failed");
                return Err(Error::Transport(format!(
                    "HTTP {}: {}",
                    response.status, snippet
                )));
            }
        };

        if let Some(message) = service_error(&value) {
            tracing::warn!(%path, %message, "service reported an error");
            return Err(Error::Api {
                message,
                body: Some(value),
            });
        }

        if !response.is_success() {
            tracing::warn!(%path, status = response.status, "request failed");
            return Err(Error::Api {
                message: format!("HTTP {}", response.status),
                body: Some(value),
            });
        }

        Ok(value)
    }
}

impl Clone for YodleeClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for YodleeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YodleeClient")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish()
    }
}
