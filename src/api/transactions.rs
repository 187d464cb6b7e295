//! Transactions service for a user's aggregated transaction history.

use std::sync::Arc;

use serde_json::Value;

use crate::auth::UserCredentials;
use crate::client::ClientInner;
use crate::models::TransactionSearch;
use crate::Result;

const EXECUTE_USER_SEARCH_PATH: &str = "jsonsdk/TransactionSearchService/executeUserSearchRequest";

/// Service for transaction search.
///
/// # Example
///
/// ```no_run
/// use yodlee_rs::models::TransactionSearch;
///
/// # async fn example(client: yodlee_rs::YodleeClient) -> yodlee_rs::Result<()> {
/// let search = TransactionSearch::new().with_range(1, 25);
/// let result = client.transactions().search(&search, None).await?;
/// println!("{}", result["searchResult"]);
/// # Ok(())
/// # }
/// ```
pub struct TransactionsService {
    inner: Arc<ClientInner>,
}

impl TransactionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Run a transaction search for the current user.
    ///
    /// Fields left unset in `search` take the service defaults.
    /// `credentials` are only used if the user token has expired.
    pub async fn search(
        &self,
        search: &TransactionSearch,
        credentials: Option<&UserCredentials>,
    ) -> Result<Value> {
        self.inner
            .post_with_user(EXECUTE_USER_SEARCH_PATH, search.to_form(), credentials)
            .await
    }

    /// Run a search with every field defaulted.
    pub async fn recent(&self, credentials: Option<&UserCredentials>) -> Result<Value> {
        self.search(&TransactionSearch::default(), credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{seeded_client, MockTransport};
    use crate::models::transaction::{
        CONTAINER_TYPE, CURRENCY_CODE, END_NUMBER, IGNORE_USER_INPUT, START_NUMBER,
    };
    use crate::Error;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_merges_defaults_with_range() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_ok(json!({ "numberOfHits": 0 }));

        let search = TransactionSearch::new().with_range(1, 5);
        client.transactions().search(&search, None).await.unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.endpoint(), EXECUTE_USER_SEARCH_PATH);
        assert_eq!(request.form[CONTAINER_TYPE], "All");
        assert_eq!(request.form[CURRENCY_CODE], "USD");
        assert_eq!(request.form[IGNORE_USER_INPUT], "true");
        assert_eq!(request.form[START_NUMBER], "1");
        assert_eq!(request.form[END_NUMBER], "5");
        assert_eq!(request.form["cobSessionToken"], "cob-tok");
        assert_eq!(request.form["userSessionToken"], "user-tok");
    }

    #[tokio::test]
    async fn test_search_refreshes_user_token_with_credentials() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        client.session().clear_user().await;

        mock.push_ok(json!({ "userContext": { "conversationCredentials": { "sessionToken": "user-new" } } }));
        mock.push_ok(json!({ "numberOfHits": 3 }));

        let user = UserCredentials::new("sbMem1", "pw").unwrap();
        let result = client.transactions().recent(Some(&user)).await.unwrap();

        assert_eq!(result["numberOfHits"], 3);
        assert_eq!(
            mock.endpoints(),
            vec!["authenticate/login", EXECUTE_USER_SEARCH_PATH]
        );
        assert_eq!(mock.requests()[1].form["userSessionToken"], "user-new");
    }

    #[tokio::test]
    async fn test_search_message_error_shape() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_ok(json!({ "message": "Invalid user session" }));

        let err = client.transactions().recent(None).await.unwrap_err();
        match err {
            Error::Api { message, body } => {
                assert_eq!(message, "Invalid user session");
                assert_eq!(body, Some(json!({ "message": "Invalid user session" })));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_transport_and_service_errors_take_same_path() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_transport_error("connection reset");
        mock.push_ok(json!({ "Error": [{ "errorDetail": "Invalid search request" }] }));

        let search = TransactionSearch::new().with_range(1, 10);
        let transport = client.transactions().search(&search, None).await.unwrap_err();
        let service = client.transactions().search(&search, None).await.unwrap_err();

        assert!(matches!(&transport, Error::Api { message, body: None } if message == "connection reset"));
        assert!(matches!(&service, Error::Api { message, body: Some(_) } if message == "Invalid search request"));
        assert_eq!(mock.endpoints(), vec![EXECUTE_USER_SEARCH_PATH; 2]);
    }
}
