//! API service modules for Yodlee endpoints.
//!
//! Each service resolves the tokens its endpoint needs through the
//! client's session, POSTs a form, and returns the response body as
//! raw JSON. A body carrying a service error, or a request that never
//! got a body, fails with [`Error::Api`](crate::Error::Api).

mod registration;
mod site_accounts;
mod transactions;

pub use registration::RegistrationService;
pub use site_accounts::SiteAccountsService;
pub use transactions::TransactionsService;
