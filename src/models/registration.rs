//! User registration request.

use std::collections::BTreeMap;
use std::fmt;

use crate::client::FormFields;
use crate::{Error, Result};

/// Credential type the service expects for password logins.
pub const PASSWORD_CREDENTIALS_TYPE: &str = "com.yodlee.ext.login.PasswordCredentials";

/// A new end user to register under the cobrand.
///
/// # Example
///
/// ```
/// use yodlee_rs::models::Registration;
///
/// let registration = Registration::new("jdoe", "s3cret!", "jdoe@example.com")
///     .with_profile_field("firstName", "Jane");
/// assert!(registration.validate().is_ok());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Registration {
    /// Login name for the new user
    pub username: Option<String>,
    /// Password for the new user
    pub password: Option<String>,
    /// Email address for the new user's profile
    pub email_address: Option<String>,
    /// Extra `userProfile.*` fields (e.g. `firstName`)
    pub profile: BTreeMap<String, String>,
}

impl Registration {
    /// Create a registration with all required fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            email_address: Some(email_address.into()),
            profile: BTreeMap::new(),
        }
    }

    /// Add a `userProfile.*` field.
    pub fn with_profile_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.profile.insert(key.into(), value.into());
        self
    }

    /// Check required fields, reporting the first one missing.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("username", &self.username),
            ("password", &self.password),
            ("emailAddress", &self.email_address),
        ];
        for (field, value) in required {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                return Err(Error::InvalidArgument { field });
            }
        }
        Ok(())
    }

    /// Build the form fields (without the cobrand token).
    pub(crate) fn to_form(&self) -> Result<FormFields> {
        self.validate()?;

        let mut form = FormFields::new();
        for (key, value) in &self.profile {
            form.insert(format!("userProfile.{}", key), value.clone());
        }
        form.insert(
            "userCredentials.loginName".to_string(),
            self.username.clone().unwrap_or_default(),
        );
        form.insert(
            "userCredentials.password".to_string(),
            self.password.clone().unwrap_or_default(),
        );
        form.insert(
            "userProfile.emailAddress".to_string(),
            self.email_address.clone().unwrap_or_default(),
        );
        form.insert(
            "userCredentials.objectInstanceType".to_string(),
            PASSWORD_CREDENTIALS_TYPE.to_string(),
        );
        Ok(form)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email_address", &self.email_address)
            .field("profile", &self.profile)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_username_reported_first() {
        let registration = Registration {
            email_address: Some("a@b.com".into()),
            ..Default::default()
        };
        match registration.validate() {
            Err(Error::InvalidArgument { field }) => assert_eq!(field, "username"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_in_order() {
        let registration = Registration {
            username: Some("jdoe".into()),
            password: Some("".into()),
            ..Default::default()
        };
        assert!(matches!(
            registration.validate(),
            Err(Error::InvalidArgument { field: "password" })
        ));

        let registration = Registration {
            username: Some("jdoe".into()),
            password: Some("pw".into()),
            ..Default::default()
        };
        assert!(matches!(
            registration.validate(),
            Err(Error::InvalidArgument { field: "emailAddress" })
        ));
    }

    #[test]
    fn test_form_fields() {
        let form = Registration::new("jdoe", "pw", "jdoe@example.com")
            .with_profile_field("firstName", "Jane")
            .to_form()
            .unwrap();

        assert_eq!(form["userCredentials.loginName"], "jdoe");
        assert_eq!(form["userCredentials.password"], "pw");
        assert_eq!(form["userProfile.emailAddress"], "jdoe@example.com");
        assert_eq!(form["userProfile.firstName"], "Jane");
        assert_eq!(
            form["userCredentials.objectInstanceType"],
            PASSWORD_CREDENTIALS_TYPE
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug_str = format!("{:?}", Registration::new("jdoe", "hunter2", "a@b.com"));
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("REDACTED"));
    }
}
