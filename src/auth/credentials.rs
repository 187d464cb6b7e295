//! Credentials and initialization options.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{Environment, Error, Result};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Cobrand (API customer) login. Set once per session.
#[derive(Clone, Debug)]
pub struct CobrandCredentials {
    username: String,
    password: SecretString,
}

impl CobrandCredentials {
    /// Create cobrand credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either value is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if is_blank(&username) || is_blank(&password) {
            return Err(Error::InvalidCredentials(
                "cobrand username and password are required".to_string(),
            ));
        }
        Ok(Self {
            username,
            password: SecretString::from(password),
        })
    }

    /// The cobrand username.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// End-user login, supplied per call when a user token must be issued.
///
/// # Example
///
/// ```
/// use yodlee_rs::UserCredentials;
///
/// assert!(UserCredentials::new("sbMemacme1", "pw").is_ok());
/// assert!(UserCredentials::new("", "pw").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct UserCredentials {
    username: String,
    password: SecretString,
}

impl UserCredentials {
    /// Create user credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either value is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if is_blank(&username) || is_blank(&password) {
            return Err(Error::InvalidCredentials(
                "user username and password are required".to_string(),
            ));
        }
        Ok(Self {
            username,
            password: SecretString::from(password),
        })
    }

    /// The end-user login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// A complete set of session tokens, as captured by
/// [`Session::snapshot`](super::Session::snapshot).
///
/// Feed it back through [`InitOptions::with_tokens`] to resume a session
/// without logging in again.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    /// Cobrand session token
    pub cob_session_token: String,
    /// User session token
    pub user_session_token: String,
    /// When the cobrand token stops being trusted
    pub cob_session_expires: DateTime<Utc>,
    /// When the user token stops being trusted
    pub user_session_expires: DateTime<Utc>,
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("cob_session_token", &"[REDACTED]")
            .field("user_session_token", &"[REDACTED]")
            .field("cob_session_expires", &self.cob_session_expires)
            .field("user_session_expires", &self.user_session_expires)
            .finish()
    }
}

/// Options accepted when initializing a session.
///
/// The four token fields are all-or-nothing: supply every one of them
/// to skip the initial cobrand login, or none to log in.
///
/// # Example
///
/// ```
/// use yodlee_rs::InitOptions;
///
/// let options = InitOptions::new("sbCobacme", "cobrand-pass").with_sandbox(false);
/// assert!(options.environment().is_live());
/// ```
#[derive(Clone, Default)]
pub struct InitOptions {
    /// Cobrand username
    pub username: String,
    /// Cobrand password
    pub password: String,
    /// Use the sandbox environment
    pub sandbox: bool,
    /// Pre-issued cobrand session token
    pub cob_session_token: Option<String>,
    /// Pre-issued user session token
    pub user_session_token: Option<String>,
    /// Expiry of the pre-issued cobrand token
    pub cob_session_expires: Option<DateTime<Utc>>,
    /// Expiry of the pre-issued user token
    pub user_session_expires: Option<DateTime<Utc>>,
}

impl InitOptions {
    /// Options for the sandbox environment with no pre-seeded tokens.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            sandbox: true,
            ..Default::default()
        }
    }

    /// Read cobrand credentials and environment from the process environment.
    ///
    /// Uses `YODLEE_COBRAND_USERNAME`, `YODLEE_COBRAND_PASSWORD` and,
    /// optionally, `YODLEE_ENVIRONMENT` (`sandbox` or `live`).
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
        };
        let username = var("YODLEE_COBRAND_USERNAME")?;
        let password = var("YODLEE_COBRAND_PASSWORD")?;
        let env: Environment = std::env::var("YODLEE_ENVIRONMENT")
            .unwrap_or_default()
            .parse()?;

        Ok(Self::new(username, password).with_sandbox(env.is_sandbox()))
    }

    /// Choose sandbox (`true`) or live (`false`).
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Pre-seed all four token fields.
    pub fn with_tokens(mut self, tokens: SessionTokens) -> Self {
        self.cob_session_token = Some(tokens.cob_session_token);
        self.user_session_token = Some(tokens.user_session_token);
        self.cob_session_expires = Some(tokens.cob_session_expires);
        self.user_session_expires = Some(tokens.user_session_expires);
        self
    }

    /// The environment selected by the `sandbox` flag.
    pub fn environment(&self) -> Environment {
        Environment::from_sandbox_flag(self.sandbox)
    }

    pub(crate) fn cobrand_credentials(&self) -> Result<CobrandCredentials> {
        CobrandCredentials::new(self.username.clone(), self.password.clone())
    }

    /// The pre-seeded tokens, if all four were given.
    ///
    /// Empty token strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PartialTokens`] when some but not all are present.
    pub(crate) fn seeded_tokens(&self) -> Result<Option<SessionTokens>> {
        let cob_token = self.cob_session_token.clone().filter(|t| !t.is_empty());
        let user_token = self.user_session_token.clone().filter(|t| !t.is_empty());

        match (
            cob_token,
            user_token,
            self.cob_session_expires,
            self.user_session_expires,
        ) {
            (Some(cob), Some(user), Some(cob_expires), Some(user_expires)) => {
                Ok(Some(SessionTokens {
                    cob_session_token: cob,
                    user_session_token: user,
                    cob_session_expires: cob_expires,
                    user_session_expires: user_expires,
                }))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(Error::PartialTokens),
        }
    }
}

impl fmt::Debug for InitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitOptions")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sandbox", &self.sandbox)
            .field("cob_session_token", &self.cob_session_token.as_ref().map(|_| "[REDACTED]"))
            .field("user_session_token", &self.user_session_token.as_ref().map(|_| "[REDACTED]"))
            .field("cob_session_expires", &self.cob_session_expires)
            .field("user_session_expires", &self.user_session_expires)
            .finish()
    }
}
