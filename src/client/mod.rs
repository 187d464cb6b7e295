//! HTTP client and service layer for the Yodlee API.
//!
//! This module provides the main entry point [`YodleeClient`], its
//! [`ClientConfig`], and the [`Transport`] seam requests go through.
//!
//! # Example
//!
//! ```no_run
//! use yodlee_rs::{YodleeClient, InitOptions};
//!
//! # async fn example() -> yodlee_rs::Result<()> {
//! let client = YodleeClient::initialize(InitOptions::new("sbCobacme", "cobrand-pass")).await?;
//! let form = client.site_accounts().login_form(&"16441".into()).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
#[cfg(test)]
pub(crate) mod mock;
mod transport;

pub use config::{ClientConfig, TOKEN_LIFETIME_MINUTES};
pub use http::YodleeClient;
pub use transport::{FormFields, ReqwestTransport, Transport, TransportResponse};
pub(crate) use http::{ClientInner, Requester};
