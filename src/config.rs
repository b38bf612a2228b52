//! Client configuration read from the process environment.

use crate::client::{Credentials, DEFAULT_GATEWAY_URL, WebSmsClient};
use crate::domain::ValidationError;
use crate::error::SmsError;

/// Gateway base URL; defaults to [`DEFAULT_GATEWAY_URL`].
pub const GATEWAY_URL_VAR: &str = "WEBSMS_GATEWAY_URL";
pub const USERNAME_VAR: &str = "WEBSMS_USERNAME";
pub const PASSWORD_VAR: &str = "WEBSMS_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything the client needs from its environment.
pub struct ClientConfig {
    pub gateway_url: String,
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Read `WEBSMS_GATEWAY_URL`, `WEBSMS_USERNAME` and `WEBSMS_PASSWORD`.
    pub fn from_env() -> Result<Self, SmsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SmsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway_url = lookup(GATEWAY_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_owned());
        let username = lookup(USERNAME_VAR).ok_or(ValidationError::Missing {
            field: USERNAME_VAR,
        })?;
        let password = lookup(PASSWORD_VAR).ok_or(ValidationError::Missing {
            field: PASSWORD_VAR,
        })?;
        Ok(Self {
            gateway_url,
            credentials: Credentials::new(username, password)?,
        })
    }

    pub fn into_client(self) -> Result<WebSmsClient, SmsError> {
        WebSmsClient::builder(self.credentials)
            .gateway_url(self.gateway_url)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::error::ErrorCause;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn gateway_url_defaults_when_unset_or_blank() {
        for vars in [
            &[(USERNAME_VAR, "user"), (PASSWORD_VAR, "secret")][..],
            &[
                (GATEWAY_URL_VAR, " "),
                (USERNAME_VAR, "user"),
                (PASSWORD_VAR, "secret"),
            ][..],
        ] {
            let config = ClientConfig::from_lookup(lookup(vars)).unwrap();
            assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
            assert_eq!(config.credentials.username(), "user");
        }
    }

    #[test]
    fn missing_credentials_are_parameter_errors() {
        let err = ClientConfig::from_lookup(lookup(&[(USERNAME_VAR, "user")])).unwrap_err();
        assert_eq!(err.cause(), ErrorCause::Parameter);
        assert_eq!(
            err.field_errors(),
            [ValidationError::Missing {
                field: PASSWORD_VAR
            }]
        );
    }

    #[test]
    fn config_builds_client_for_custom_gateway() {
        let client = ClientConfig::from_lookup(lookup(&[
            (GATEWAY_URL_VAR, "http://127.0.0.1:9/"),
            (USERNAME_VAR, "user"),
            (PASSWORD_VAR, "secret"),
        ]))
        .unwrap()
        .into_client()
        .unwrap();
        assert_eq!(client.gateway_url().as_str(), "http://127.0.0.1:9/");
    }
}
