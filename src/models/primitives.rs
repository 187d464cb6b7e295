//! Primitive types and newtypes for type-safe API interactions.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A strongly-typed site identifier.
///
/// Sites are the financial institutions the aggregation service can
/// log into on a user's behalf.
///
/// # Example
///
/// ```
/// use yodlee_rs::SiteId;
///
/// let site = SiteId::new("16441");
/// assert_eq!(site.as_str(), "16441");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Create a new site ID from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the site ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the ID is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SiteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SiteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SiteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for SiteId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Environment configuration for the Yodlee API.
///
/// Determines which REST endpoint to use. Sandbox URLs are private to
/// each cobrand, so they are parameterized by the cobrand username.
///
/// # Example
///
/// ```
/// use yodlee_rs::Environment;
///
/// let env = Environment::Sandbox;
/// println!("API URL: {}", env.api_base_url("sbCobacme")?);
/// # Ok::<(), yodlee_rs::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Developer sandbox with test institutions.
    #[default]
    Sandbox,
    /// Live environment with real institutions.
    Live,
}

const SANDBOX_ROOT_URL: &str = "https://rest.developer.yodlee.com/services/srest/";
const SANDBOX_SEGMENT_PREFIX: &str = "private-";
const API_VERSION_SEGMENT: &str = "v1.0";
const LIVE_BASE_URL: &str = "https://rest.yodlee.com/services/srest/restserver/v1.0/";

impl Environment {
    /// Get the base URL for REST API requests.
    ///
    /// The result always ends with `/`, so relative endpoint paths can be
    /// appended directly. The cobrand username becomes a single
    /// percent-encoded path segment, so `/`, `?` and `#` in it cannot
    /// change which endpoint is addressed.
    pub fn api_base_url(&self, cobrand_username: &str) -> crate::Result<String> {
        match self {
            Environment::Sandbox => {
                let mut url = Url::parse(SANDBOX_ROOT_URL)?;
                url.path_segments_mut()
                    .map_err(|_| {
                        crate::Error::Config("sandbox root URL cannot take path segments".into())
                    })?
                    .pop_if_empty()
                    .push(&format!("{}{}", SANDBOX_SEGMENT_PREFIX, cobrand_username))
                    .push(API_VERSION_SEGMENT)
                    .push("");
                Ok(url.into())
            }
            Environment::Live => Ok(LIVE_BASE_URL.to_string()),
        }
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }

    /// Returns `true` if this is the live environment.
    pub fn is_live(&self) -> bool {
        matches!(self, Environment::Live)
    }

    /// Pick the environment from the `sandbox` flag of the init options.
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Environment::Sandbox
        } else {
            Environment::Live
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Live => write!(f, "live"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" | "" => Ok(Environment::Sandbox),
            "live" | "production" | "prod" => Ok(Environment::Live),
            other => Err(crate::Error::Config(format!(
                "Unknown environment: {}. Expected sandbox or live",
                other
            ))),
        }
    }
}
