//! Registration service for creating end users under the cobrand.

use std::sync::Arc;

use serde_json::Value;

use crate::client::ClientInner;
use crate::models::Registration;
use crate::Result;

const REGISTER_PATH: &str = "jsonsdk/UserRegistration/register3";

/// Service for registering new end users.
///
/// # Example
///
/// ```no_run
/// use yodlee_rs::models::Registration;
///
/// # async fn example(client: yodlee_rs::YodleeClient) -> yodlee_rs::Result<()> {
/// let registration = Registration::new("jdoe", "s3cret!", "jdoe@example.com");
/// let user = client.registration().register(&registration).await?;
/// # Ok(())
/// # }
/// ```
pub struct RegistrationService {
    inner: Arc<ClientInner>,
}

impl RegistrationService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Register a new user.
    ///
    /// Required fields are checked before any request is made; the first
    /// missing one is reported as [`Error::InvalidArgument`](crate::Error::InvalidArgument).
    /// Registration does not log the new user in.
    pub async fn register(&self, registration: &Registration) -> Result<Value> {
        let form = registration.to_form()?;
        self.inner.post_with_cobrand(REGISTER_PATH, form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{seeded_client, MockTransport};
    use crate::models::registration::PASSWORD_CREDENTIALS_TYPE;
    use crate::Error;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_missing_username_makes_no_request() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;

        let registration = Registration {
            email_address: Some("a@b.com".into()),
            ..Default::default()
        };
        let err = client.registration().register(&registration).await.unwrap_err();

        assert!(matches!(err, Error::InvalidArgument { field: "username" }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_credentials_and_profile() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        let body = json!({ "userContext": { "conversationCredentials": { "sessionToken": "x" } } });
        mock.push_ok(body.clone());

        let value = client
            .registration()
            .register(&Registration::new("jdoe", "pw", "jdoe@example.com"))
            .await
            .unwrap();

        assert_eq!(value, body);
        let request = &mock.requests()[0];
        assert_eq!(request.endpoint(), REGISTER_PATH);
        assert_eq!(request.form["cobSessionToken"], "cob-tok");
        assert_eq!(request.form["userCredentials.loginName"], "jdoe");
        assert_eq!(request.form["userProfile.emailAddress"], "jdoe@example.com");
        assert_eq!(
            request.form["userCredentials.objectInstanceType"],
            PASSWORD_CREDENTIALS_TYPE
        );
        assert!(!request.form.contains_key("userSessionToken"));
    }

    #[tokio::test]
    async fn test_register_service_error() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_ok(json!({ "Error": [{ "errorDetail": "Login name already exists" }] }));

        let err = client
            .registration()
            .register(&Registration::new("jdoe", "pw", "jdoe@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(&err, Error::Api { message, .. } if message == "Login name already exists"));
    }

    #[tokio::test]
    async fn test_register_transport_and_service_errors_take_same_path() {
        let mock = Arc::new(MockTransport::new());
        let client = seeded_client(&mock).await;
        mock.push_transport_error("connection reset");
        mock.push_ok(json!({ "Error": [{ "errorDetail": "Login name already exists" }] }));

        let registration = Registration::new("jdoe", "pw", "jdoe@example.com");
        let transport = client.registration().register(&registration).await.unwrap_err();
        let service = client.registration().register(&registration).await.unwrap_err();

        assert!(matches!(&transport, Error::Api { message, body: None } if message == "connection reset"));
        assert!(matches!(&service, Error::Api { message, body: Some(_) } if message == "Login name already exists"));
        assert_eq!(mock.endpoints(), vec![REGISTER_PATH; 2]);
    }
}
