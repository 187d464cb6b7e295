//! Authentication and session management for the Yodlee API.
//!
//! The service uses two layered tokens:
//!
//! 1. **Cobrand token** - issued to the API customer from its cobrand
//!    username and password. Required by every call.
//! 2. **User token** - issued to an end user, from that user's
//!    credentials plus a valid cobrand token. Required by calls that
//!    read the user's accounts and transactions.
//!
//! Both live for 20 minutes. [`Session`] caches them and logs in again
//! on demand when one has expired.
//!
//! ```no_run
//! use std::sync::Arc;
//! use yodlee_rs::{ClientConfig, InitOptions, ReqwestTransport, Session, UserCredentials};
//!
//! # async fn example() -> yodlee_rs::Result<()> {
//! let config = ClientConfig::default();
//! let session = Session::initialize(
//!     InitOptions::new("sbCobacme", "cobrand-pass"),
//!     &config,
//!     Arc::new(ReqwestTransport::new(&config)?),
//! ).await?;
//!
//! let user = UserCredentials::new("sbMemacme1", "user-pass")?;
//! let tokens = session.tokens(Some(&user)).await?;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod session;
mod token;

pub use credentials::{CobrandCredentials, InitOptions, SessionTokens, UserCredentials};
pub use session::{Session, TokenPair};
pub use token::SessionToken;
