//! Session management for Yodlee API authentication.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::client::{ClientConfig, FormFields, Requester, Transport};
use crate::{Environment, Error, Result};

use super::credentials::{CobrandCredentials, InitOptions, SessionTokens, UserCredentials};
use super::token::SessionToken;

const COBRAND_LOGIN_PATH: &str = "authenticate/coblogin";
const USER_LOGIN_PATH: &str = "authenticate/login";

/// Authentication session for the Yodlee API.
///
/// Holds the cobrand credentials and two cached tokens: the cobrand
/// token, owned by the API customer, and the user token, owned by the
/// end user currently being served. A user login always needs a valid
/// cobrand token first.
///
/// # Thread Safety
///
/// `Session` is cheap to clone and safe to share across tasks. Each
/// token has its own lock, held across the expiry check and any
/// re-authentication, so concurrent callers that find a stale token
/// share a single login request instead of racing.
///
/// A session serves one end user at a time. Resolving a user token with
/// different credentials overwrites the cached one; create one session
/// per user when serving several.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    env: Environment,
    credentials: CobrandCredentials,
    requester: Requester,
    token_lifetime: Duration,
    cobrand: Mutex<SessionToken>,
    user: Mutex<SessionToken>,
}

/// Both tokens, resolved together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Cobrand session token
    pub cobrand: SecretString,
    /// User session token
    pub user: SecretString,
}

impl Session {
    /// Create a session from initialization options.
    ///
    /// With all four token fields present in `options` the tokens are
    /// stored as given and no request is made. With none present a
    /// cobrand login is performed before returning.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCredentials`] if the cobrand username or password is empty
    /// - [`Error::PartialTokens`] if only some token fields are present
    /// - [`Error::Authentication`] if the cobrand login fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use yodlee_rs::{ClientConfig, InitOptions, ReqwestTransport, Session};
    ///
    /// # async fn example() -> yodlee_rs::Result<()> {
    /// let config = ClientConfig::default();
    /// let transport = Arc::new(ReqwestTransport::new(&config)?);
    /// let session = Session::initialize(
    ///     InitOptions::new("sbCobacme", "cobrand-pass"),
    ///     &config,
    ///     transport,
    /// ).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn initialize(
        options: InitOptions,
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let credentials = options.cobrand_credentials()?;
        let seeded = options.seeded_tokens()?;
        let env = options.environment();
        let base_url = config.resolve_base_url(env, credentials.username())?;

        let (cobrand, user) = match &seeded {
            Some(tokens) => (
                SessionToken::new(tokens.cob_session_token.clone(), tokens.cob_session_expires),
                SessionToken::new(tokens.user_session_token.clone(), tokens.user_session_expires),
            ),
            None => (SessionToken::default(), SessionToken::default()),
        };

        let session = Self {
            inner: Arc::new(SessionInner {
                env,
                credentials,
                requester: Requester::new(transport, base_url),
                token_lifetime: config.token_lifetime,
                cobrand: Mutex::new(cobrand),
                user: Mutex::new(user),
            }),
        };

        if seeded.is_some() {
            tracing::debug!(env = %session.inner.env, "session restored from pre-seeded tokens");
        } else {
            session.cobrand_login().await?;
        }

        Ok(session)
    }

    /// Log in as the cobrand and cache the new cobrand token.
    ///
    /// Always issues a request, overwriting any cached token.
    pub async fn cobrand_login(&self) -> Result<SecretString> {
        let mut cobrand = self.inner.cobrand.lock().await;
        self.login_cobrand_locked(&mut cobrand).await
    }

    /// Log an end user in and cache the new user token.
    ///
    /// Resolves a valid cobrand token first, logging the cobrand in
    /// again if it has expired.
    pub async fn user_login(&self, credentials: &UserCredentials) -> Result<SecretString> {
        let mut user = self.inner.user.lock().await;
        Ok(self.login_user_locked(&mut user, credentials).await?.user)
    }

    /// Get a valid cobrand token, logging in again if it has expired.
    pub async fn cobrand_token(&self) -> Result<SecretString> {
        let mut cobrand = self.inner.cobrand.lock().await;
        if let Some(token) = cobrand.valid_token_at(Utc::now()) {
            return Ok(token);
        }

        tracing::debug!("cobrand token missing or expired");
        self.login_cobrand_locked(&mut cobrand).await
    }

    /// Get a valid user token.
    ///
    /// An expired or missing token is replaced by logging in with
    /// `credentials`. Without credentials the caller gets
    /// [`Error::SessionExpired`] and no request is made.
    pub async fn user_token(&self, credentials: Option<&UserCredentials>) -> Result<SecretString> {
        let mut user = self.inner.user.lock().await;
        if let Some(token) = user.valid_token_at(Utc::now()) {
            return Ok(token);
        }

        match credentials {
            Some(credentials) => {
                tracing::debug!(user = %credentials.username(), "user token missing or expired");
                Ok(self.login_user_locked(&mut user, credentials).await?.user)
            }
            None => Err(Error::SessionExpired),
        }
    }

    /// Get valid cobrand and user tokens, cobrand first.
    ///
    /// When the user token has to be reissued, the returned cobrand token
    /// is the one that user login was made with, even if the cobrand had
    /// to log in again in between.
    pub async fn tokens(&self, credentials: Option<&UserCredentials>) -> Result<TokenPair> {
        let cobrand = self.cobrand_token().await?;

        let mut slot = self.inner.user.lock().await;
        if let Some(user) = slot.valid_token_at(Utc::now()) {
            return Ok(TokenPair { cobrand, user });
        }

        let credentials = credentials.ok_or(Error::SessionExpired)?;
        tracing::debug!(user = %credentials.username(), "user token missing or expired");
        self.login_user_locked(&mut slot, credentials).await
    }

    /// Capture both tokens so the session can be resumed later.
    ///
    /// Returns `None` until both a cobrand and a user token have been
    /// issued. Expired tokens are included as-is.
    pub async fn snapshot(&self) -> Option<SessionTokens> {
        let user = self.inner.user.lock().await.clone();
        let cobrand = self.inner.cobrand.lock().await.clone();

        Some(SessionTokens {
            cob_session_token: cobrand.token()?.expose_secret().to_string(),
            user_session_token: user.token()?.expose_secret().to_string(),
            cob_session_expires: cobrand.expires()?,
            user_session_expires: user.expires()?,
        })
    }

    /// Forget the cached user token.
    ///
    /// The next call needing a user token must supply credentials.
    pub async fn clear_user(&self) {
        self.inner.user.lock().await.clear();
    }

    /// When the cached cobrand token expires, if one is cached.
    pub async fn cobrand_expires(&self) -> Option<DateTime<Utc>> {
        self.inner.cobrand.lock().await.expires()
    }

    /// When the cached user token expires, if one is cached.
    pub async fn user_expires(&self) -> Option<DateTime<Utc>> {
        self.inner.user.lock().await.expires()
    }

    /// Get the environment this session is connected to.
    pub fn environment(&self) -> Environment {
        self.inner.env
    }

    /// The base URL endpoint paths are appended to.
    pub fn base_url(&self) -> &str {
        self.inner.requester.base_url()
    }

    /// The cobrand username.
    pub fn cobrand_username(&self) -> &str {
        self.inner.credentials.username()
    }

    pub(crate) fn requester(&self) -> &Requester {
        &self.inner.requester
    }

    // Private helper methods

    async fn login_cobrand_locked(&self, slot: &mut SessionToken) -> Result<SecretString> {
        let credentials = &self.inner.credentials;
        let mut form = FormFields::new();
        form.insert("cobrandLogin".to_string(), credentials.username().to_string());
        form.insert("cobrandPassword".to_string(), credentials.password().to_string());

        tracing::debug!(cobrand = %credentials.username(), "cobrand login");
        let body = self
            .inner
            .requester
            .post(COBRAND_LOGIN_PATH, &form)
            .await
            .map_err(Error::into_authentication)?;

        let response: CobrandLoginResponse = parse_login(COBRAND_LOGIN_PATH, body)?;
        let token = SecretString::from(response.cobrand_conversation_credentials.session_token);
        let expires = Utc::now() + self.inner.token_lifetime;
        slot.replace(token.clone(), expires);

        tracing::info!(%expires, "cobrand token issued");
        Ok(token)
    }

    async fn login_user_locked(
        &self,
        slot: &mut SessionToken,
        credentials: &UserCredentials,
    ) -> Result<TokenPair> {
        let cob_token = self.cobrand_token().await?;

        let mut form = FormFields::new();
        form.insert("login".to_string(), credentials.username().to_string());
        form.insert("password".to_string(), credentials.password().to_string());
        form.insert("cobSessionToken".to_string(), cob_token.expose_secret().to_string());

        tracing::debug!(user = %credentials.username(), "user login");
        let body = self
            .inner
            .requester
            .post(USER_LOGIN_PATH, &form)
            .await
            .map_err(Error::into_authentication)?;

        let response: UserLoginResponse = parse_login(USER_LOGIN_PATH, body)?;
        let token = SecretString::from(response.user_context.conversation_credentials.session_token);
        let expires = Utc::now() + self.inner.token_lifetime;
        slot.replace(token.clone(), expires);

        tracing::info!(user = %credentials.username(), %expires, "user token issued");
        Ok(TokenPair {
            cobrand: cob_token,
            user: token,
        })
    }
}

fn parse_login<T: serde::de::DeserializeOwned>(path: &str, body: Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| Error::Protocol(format!("{} response has no session token: {}", path, e)))
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("env", &self.inner.env)
            .field("cobrand", &self.inner.credentials.username())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CobrandLoginResponse {
    cobrand_conversation_credentials: ConversationCredentials,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserLoginResponse {
    user_context: UserContext,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserContext {
    conversation_credentials: ConversationCredentials,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationCredentials {
    session_token: String,
}
