//! A cached session token and its expiry.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;

/// One cached token (cobrand or user).
///
/// There is no stored "expired" state: a token is usable only while it
/// is present and its expiry is strictly later than the time it is
/// checked at.
#[derive(Clone, Default)]
pub struct SessionToken {
    token: Option<SecretString>,
    expires: Option<DateTime<Utc>>,
}

impl SessionToken {
    /// A token that expires at `expires`.
    pub fn new(token: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
            expires: Some(expires),
        }
    }

    /// A token issued now that lives for `lifetime`.
    pub fn issued_now(token: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(token, Utc::now() + lifetime)
    }

    /// Returns `true` if the token is present and unexpired at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.token.is_some() && self.expires.is_some_and(|expires| expires > now)
    }

    /// Returns `true` if the token is present and unexpired right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// The token, if still valid at `now`.
    pub fn valid_token_at(&self, now: DateTime<Utc>) -> Option<SecretString> {
        if self.is_valid_at(now) {
            self.token.clone()
        } else {
            None
        }
    }

    /// The stored token regardless of expiry.
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// When the token stops being trusted.
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// Replace token and expiry together.
    pub(crate) fn replace(&mut self, token: SecretString, expires: DateTime<Utc>) {
        *self = Self {
            token: Some(token),
            expires: Some(expires),
        };
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("expires", &self.expires)
            .finish()
    }
}
