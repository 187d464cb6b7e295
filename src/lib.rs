//! # yodlee-rs
//!
//! An async Rust client for the Yodlee financial-data aggregation API.
//!
//! The service authenticates in two layers: the API customer (the
//! *cobrand*) logs in first, and each end user logs in on top of the
//! cobrand session. This crate keeps both tokens cached, re-issues them
//! when they expire, and attaches them to each endpoint call.
//!
//! ## Features
//!
//! - **Session management**: cobrand and user tokens with expiry tracking
//!   and on-demand re-login
//! - **Resumable sessions**: snapshot tokens and pre-seed them later
//! - **Site accounts**: linked accounts and institution login forms
//! - **Transactions**: transaction search with service defaults filled in
//! - **Registration**: create end users under the cobrand
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yodlee_rs::{YodleeClient, InitOptions, UserCredentials};
//! use yodlee_rs::models::TransactionSearch;
//!
//! #[tokio::main]
//! async fn main() -> yodlee_rs::Result<()> {
//!     // Logs the cobrand in
//!     let client = YodleeClient::initialize(
//!         InitOptions::new("sbCobacme", "cobrand-pass"),
//!     ).await?;
//!
//!     // Log the end user in
//!     let user = UserCredentials::new("sbMemacme1", "user-pass")?;
//!     client.login_user(&user).await?;
//!
//!     let accounts = client.site_accounts().list(Some(&user)).await?;
//!     println!("Accounts: {}", accounts);
//!
//!     let search = TransactionSearch::new().with_range(1, 25);
//!     let transactions = client.transactions().search(&search, Some(&user)).await?;
//!     println!("Transactions: {}", transactions);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Expired sessions
//!
//! Cobrand tokens are re-issued transparently. User tokens are re-issued
//! only when the call carries the user's credentials; otherwise the call
//! fails with [`Error::SessionExpired`] so the caller can ask for them.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{Environment, SiteId};
pub use client::{ClientConfig, ReqwestTransport, Transport, TransportResponse, YodleeClient};
pub use auth::{InitOptions, Session, SessionTokens, UserCredentials};

/// Prelude module for convenient imports.
///
/// ```rust
/// use yodlee_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{Environment, Registration, SiteId, TransactionSearch};
    pub use crate::client::{ClientConfig, YodleeClient};
    pub use crate::auth::{InitOptions, Session, SessionTokens, TokenPair, UserCredentials};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_id_creation() {
        let site = SiteId::new("16441");
        assert_eq!(site.as_str(), "16441");
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Sandbox.api_base_url("sbCobacme").unwrap(),
            "https://rest.developer.yodlee.com/services/srest/private-sbCobacme/v1.0/"
        );
        assert_eq!(
            Environment::Live.api_base_url("sbCobacme").unwrap(),
            "https://rest.yodlee.com/services/srest/restserver/v1.0/"
        );
    }
}
