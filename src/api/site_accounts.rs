//! Site accounts service: linked institution accounts and login forms.

use std::sync::Arc;

use serde_json::Value;

use crate::auth::UserCredentials;
use crate::client::{ClientInner, FormFields};
use crate::models::SiteId;
use crate::{Error, Result};

const GET_ALL_SITE_ACCOUNTS_PATH: &str = "jsonsdk/SiteAccountManagement/getAllSiteAccounts";
const GET_SITE_LOGIN_FORM_PATH: &str = "jsonsdk/SiteAccountManagement/getSiteLoginForm";

/// Service for site account operations.
///
/// # Example
///
/// ```no_run
/// use yodlee_rs::{SiteId, UserCredentials};
///
/// # async fn example(client: yodlee_rs::YodleeClient) -> yodlee_rs::Result<()> {
/// let user = UserCredentials::new("sbMemacme1", "user-pass")?;
/// let accounts = client.site_accounts().list(Some(&user)).await?;
///
/// let form = client.site_accounts().login_form(&SiteId::new("16441")).await?;
/// # Ok(())
/// # }
/// ```
pub struct SiteAccountsService {
    inner: Arc<ClientInner>,
}

impl SiteAccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List every site account linked by the current user.
    ///
    /// `credentials` are only used if the user token has expired.
    pub async fn list(&self, credentials: Option<&UserCredentials>) -> Result<Value> {
        self.inner
            .post_with_user(GET_ALL_SITE_ACCOUNTS_PATH, FormFields::new(), credentials)
            .await
    }

    /// Get the login form a user fills in to link `site_id`.
    pub async fn login_form(&self, site_id: &SiteId) -> Result<Value> {
        if site_id.is_blank() {
            return Err(Error::InvalidArgument { field: "siteId" });
        }

        let mut form = FormFields::new();
        form.insert("siteId".to_string(), site_id.to_string());
        self.inner
            .post_with_cobrand(GET_SITE_LOGIN_FORM_PATH, form)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{seeded_client, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_sends_both_tokens_and_returns_body_verbatim() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        let body = json!([{ "siteAccountId": 10000261, "siteInfo": { "siteId": 16441 } }]);
        mock.push_ok(body.clone());

        let value = client.site_accounts().list(None).await.unwrap();

        assert_eq!(value, body);
        let request = &mock.requests()[0];
        assert_eq!(request.endpoint(), GET_ALL_SITE_ACCOUNTS_PATH);
        assert_eq!(request.form["cobSessionToken"], "cob-tok");
        assert_eq!(request.form["userSessionToken"], "user-tok");
    }

    #[tokio::test]
    async fn test_list_without_user_session_fails_before_request() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        client.session().clear_user().await;

        let err = client.site_accounts().list(None).await.unwrap_err();
        assert!(matches!(err, Error::SessionExpired));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_form_requires_site_id() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;

        let err = client.site_accounts().login_form(&SiteId::new("")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "siteId" }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_form_uses_cobrand_token_only() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_ok(json!({ "componentList": [] }));

        client.site_accounts().login_form(&SiteId::from(16441u64)).await.unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.endpoint(), GET_SITE_LOGIN_FORM_PATH);
        assert_eq!(request.form["siteId"], "16441");
        assert_eq!(request.form["cobSessionToken"], "cob-tok");
        assert!(!request.form.contains_key("userSessionToken"));
    }

    #[tokio::test]
    async fn test_transport_and_service_errors_take_same_path() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_transport_error("connection reset");
        mock.push_ok(json!({ "Error": [{ "errorDetail": "Invalid siteId" }] }));

        let transport = client.site_accounts().login_form(&"1".into()).await.unwrap_err();
        let service = client.site_accounts().login_form(&"1".into()).await.unwrap_err();

        assert!(matches!(&transport, Error::Api { message, .. } if message == "connection reset"));
        assert!(matches!(&service, Error::Api { message, .. } if message == "Invalid siteId"));
    }

    #[tokio::test]
    async fn test_list_transport_and_service_errors_take_same_path() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_transport_error("connection reset");
        mock.push_ok(json!({ "Error": [{ "errorDetail": "Invalid user session" }] }));

        let transport = client.site_accounts().list(None).await.unwrap_err();
        let service = client.site_accounts().list(None).await.unwrap_err();

        assert!(matches!(&transport, Error::Api { message, body: None } if message == "connection reset"));
        assert!(matches!(&service, Error::Api { message, body: Some(_) } if message == "Invalid user session"));
        assert_eq!(mock.endpoints(), vec![GET_ALL_SITE_ACCOUNTS_PATH; 2]);
    }

    #[tokio::test]
    async fn test_list_error_status_is_api_error() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_status(500, json!({ "errorCode": "Y800", "errorMessage": "internal" }));

        let err = client.site_accounts().list(None).await.unwrap_err();
        assert!(matches!(&err, Error::Api { message, body: Some(_) } if message == "HTTP 500"));
    }
}
