//! Transaction search request parameters.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::client::FormFields;

const PREFIX: &str = "transactionSearchRequest.";

/// Form key for the container type filter.
pub const CONTAINER_TYPE: &str = "transactionSearchRequest.containerType";
/// Form key for the upper fetch limit.
pub const HIGHER_FETCH_LIMIT: &str = "transactionSearchRequest.higherFetchLimit";
/// Form key for the lower fetch limit.
pub const LOWER_FETCH_LIMIT: &str = "transactionSearchRequest.lowerFetchLimit";
/// Form key for the first result to return.
pub const START_NUMBER: &str = "transactionSearchRequest.resultRange.startNumber";
/// Form key for the last result to return.
pub const END_NUMBER: &str = "transactionSearchRequest.resultRange.endNumber";
/// Form key for the search client ID.
pub const CLIENT_ID: &str = "transactionSearchRequest.searchClients.clientId";
/// Form key for the search client name.
pub const CLIENT_NAME: &str = "transactionSearchRequest.searchClients.clientName";
/// Form key for the ignore-user-input flag.
pub const IGNORE_USER_INPUT: &str = "transactionSearchRequest.ignoreUserInput";
/// Form key for the currency filter.
pub const CURRENCY_CODE: &str = "transactionSearchRequest.searchFilter.currencyCode";
/// Form key for the split type filter.
pub const SPLIT_TYPE: &str = "transactionSearchRequest.searchFilter.transactionSplitType";
/// Form key for the start of the post-date range.
pub const FROM_DATE: &str = "transactionSearchRequest.searchFilter.postDateRange.fromDate";
/// Form key for the end of the post-date range.
pub const TO_DATE: &str = "transactionSearchRequest.searchFilter.postDateRange.toDate";

/// Post dates are sent as `MM-DD-YYYY`.
const DATE_FORMAT: &str = "%m-%d-%Y";

/// Parameters for a user transaction search.
///
/// Every field is optional; unset fields fall back to the defaults the
/// service expects (container `All`, fetch limits 500/1, result range
/// 1-5, currency `USD`, ignore-user-input `true`).
///
/// # Example
///
/// ```
/// use yodlee_rs::models::TransactionSearch;
///
/// let search = TransactionSearch::new()
///     .with_range(1, 50)
///     .with_container_type("bank");
/// let form = search.to_form();
/// assert_eq!(form["transactionSearchRequest.containerType"], "bank");
/// assert_eq!(form["transactionSearchRequest.searchFilter.currencyCode"], "USD");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSearch {
    /// Container type (`All`, `bank`, `credits`, ...)
    pub container_type: Option<String>,
    /// Upper fetch limit
    pub higher_fetch_limit: Option<u32>,
    /// Lower fetch limit
    pub lower_fetch_limit: Option<u32>,
    /// First result to return (1-based)
    pub start_number: Option<u32>,
    /// Last result to return (inclusive)
    pub end_number: Option<u32>,
    /// Search client ID
    pub client_id: Option<u32>,
    /// Search client name
    pub client_name: Option<String>,
    /// Whether the service should ignore user-entered search input
    pub ignore_user_input: Option<bool>,
    /// Currency filter
    pub currency_code: Option<String>,
    /// Split type filter
    pub transaction_split_type: Option<String>,
    /// Start of the post-date range
    pub from_date: Option<NaiveDate>,
    /// End of the post-date range
    pub to_date: Option<NaiveDate>,
    /// Extra raw form fields, merged last.
    ///
    /// Keys without the `transactionSearchRequest.` prefix get it added.
    pub extra: BTreeMap<String, String>,
}

impl TransactionSearch {
    /// Create a search with every field defaulted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result range.
    pub fn with_range(mut self, start: u32, end: u32) -> Self {
        self.start_number = Some(start);
        self.end_number = Some(end);
        self
    }

    /// Set the container type.
    pub fn with_container_type(mut self, container_type: impl Into<String>) -> Self {
        self.container_type = Some(container_type.into());
        self
    }

    /// Set the fetch limits.
    pub fn with_fetch_limits(mut self, lower: u32, higher: u32) -> Self {
        self.lower_fetch_limit = Some(lower);
        self.higher_fetch_limit = Some(higher);
        self
    }

    /// Set the currency filter.
    pub fn with_currency(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    /// Restrict the search to a post-date range.
    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    /// Add a raw form field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the form fields, caller values merged over defaults.
    pub fn to_form(&self) -> FormFields {
        let mut form = FormFields::new();

        let mut set = |key: &str, value: String| {
            form.insert(key.to_string(), value);
        };

        set(
            CONTAINER_TYPE,
            self.container_type.clone().unwrap_or_else(|| "All".to_string()),
        );
        set(
            HIGHER_FETCH_LIMIT,
            self.higher_fetch_limit.unwrap_or(500).to_string(),
        );
        set(
            LOWER_FETCH_LIMIT,
            self.lower_fetch_limit.unwrap_or(1).to_string(),
        );
        set(START_NUMBER, self.start_number.unwrap_or(1).to_string());
        set(END_NUMBER, self.end_number.unwrap_or(5).to_string());
        set(CLIENT_ID, self.client_id.unwrap_or(1).to_string());
        set(
            CLIENT_NAME,
            self.client_name
                .clone()
                .unwrap_or_else(|| "DataSearchService".to_string()),
        );
        set(
            IGNORE_USER_INPUT,
            self.ignore_user_input.unwrap_or(true).to_string(),
        );
        set(
            CURRENCY_CODE,
            self.currency_code.clone().unwrap_or_else(|| "USD".to_string()),
        );
        set(
            SPLIT_TYPE,
            self.transaction_split_type
                .clone()
                .unwrap_or_else(|| "ALL_TRANSACTION".to_string()),
        );
        if let Some(from) = self.from_date {
            set(FROM_DATE, from.format(DATE_FORMAT).to_string());
        }
        if let Some(to) = self.to_date {
            set(TO_DATE, to.format(DATE_FORMAT).to_string());
        }

        for (key, value) in &self.extra {
            let key = if key.starts_with(PREFIX) {
                key.clone()
            } else {
                format!("{}{}", PREFIX, key)
            };
            form.insert(key, value.clone());
        }

        form
    }
}
