//! Data models for the Yodlee API.
//!
//! Response bodies are passed through as raw JSON, so the models here
//! only cover what the client sends:
//!
//! - [`primitives`] - Core types like `SiteId` and `Environment`
//! - [`transaction`] - Transaction search parameters
//! - [`registration`] - New user registration

pub mod primitives;
pub mod registration;
pub mod transaction;

pub use primitives::*;
pub use registration::Registration;
pub use transaction::TransactionSearch;
