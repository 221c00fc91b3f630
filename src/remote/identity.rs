//! Hosted identity provider client.
//!
//! Endpoint shapes follow the Firebase identity-toolkit REST conventions:
//! `POST {base}/v1/accounts:signUp`, `:signInWithPassword` and
//! `:revokeToken`, with an optional `key` query parameter for the project
//! API key.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::debug;

use super::{base_url, error_detail, http_client};
use crate::auth::{AccountId, IdentityProvider, ProviderError, Session};

pub struct RestIdentityProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl RestIdentityProvider {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(url: &str, api_key: Option<SecretString>) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url(url)?,
            api_key,
        })
    }

    fn post(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{endpoint}", self.base_url);
        let request = self.client.post(url);
        match &self.api_key {
            Some(key) => request.query(&[("key", key.expose_secret())]),
            None => request,
        }
    }

    async fn call(
        &self,
        endpoint: &str,
        payload: Value,
    ) -> Result<Value, (StatusCode, String)> {
        let response = self
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| (StatusCode::BAD_GATEWAY, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err((status, error_detail(response).await));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| (StatusCode::BAD_GATEWAY, err.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccountId, ProviderError> {
        let payload = json!({
            "email": email,
            "password": password.expose_secret(),
            "returnSecureToken": true,
        });

        let body = self
            .call("/v1/accounts:signUp", payload)
            .await
            .map_err(|(status, detail)| signup_error(status, &detail))?;

        debug!("account created for {email}");

        account_id(&body)
    }

    async fn verify_credential(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, ProviderError> {
        let payload = json!({
            "email": email,
            "password": password.expose_secret(),
            "returnSecureToken": true,
        });

        let body = self
            .call("/v1/accounts:signInWithPassword", payload)
            .await
            .map_err(|(status, detail)| login_error(status, &detail))?;

        let token = body["idToken"].as_str().ok_or_else(|| {
            ProviderError::Unavailable("identity response missing idToken".to_string())
        })?;

        Ok(Session::new(
            account_id(&body)?,
            SecretString::from(token.to_string()),
        ))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError> {
        let payload = json!({ "token": session.token().expose_secret() });

        self.call("/v1/accounts:revokeToken", payload)
            .await
            .map_err(|(status, detail)| {
                ProviderError::Unavailable(format!("revokeToken - {status}, {detail}"))
            })?;

        Ok(())
    }
}

fn account_id(body: &Value) -> Result<AccountId, ProviderError> {
    body["localId"]
        .as_str()
        .map(AccountId::new)
        .ok_or_else(|| ProviderError::Unavailable("identity response missing localId".to_string()))
}

fn signup_error(status: StatusCode, detail: &str) -> ProviderError {
    if detail.starts_with("EMAIL_EXISTS") {
        ProviderError::EmailTaken
    } else if detail.starts_with("WEAK_PASSWORD") {
        ProviderError::WeakPassword(detail.to_string())
    } else {
        ProviderError::Unavailable(format!("signUp - {status}, {detail}"))
    }
}

fn login_error(status: StatusCode, detail: &str) -> ProviderError {
    // The provider deliberately keeps wrong-password and unknown-email
    // indistinguishable.
    if detail.starts_with("EMAIL_NOT_FOUND")
        || detail.starts_with("INVALID_PASSWORD")
        || detail.starts_with("INVALID_LOGIN_CREDENTIALS")
    {
        ProviderError::InvalidCredentials
    } else {
        ProviderError::Unavailable(format!("signInWithPassword - {status}, {detail}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(RestIdentityProvider::new("not a url", None).is_err());
        assert!(RestIdentityProvider::new("https://identity.example.com", None).is_ok());
    }

    #[test]
    fn signup_error_mapping() {
        assert!(matches!(
            signup_error(StatusCode::BAD_REQUEST, "EMAIL_EXISTS"),
            ProviderError::EmailTaken
        ));
        assert!(matches!(
            signup_error(
                StatusCode::BAD_REQUEST,
                "WEAK_PASSWORD : Password should be at least 6 characters"
            ),
            ProviderError::WeakPassword(_)
        ));
        assert!(matches!(
            signup_error(StatusCode::INTERNAL_SERVER_ERROR, ""),
            ProviderError::Unavailable(_)
        ));
    }

    #[test]
    fn login_error_mapping() {
        for detail in ["EMAIL_NOT_FOUND", "INVALID_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
            assert!(matches!(
                login_error(StatusCode::BAD_REQUEST, detail),
                ProviderError::InvalidCredentials
            ));
        }
        assert!(matches!(
            login_error(StatusCode::SERVICE_UNAVAILABLE, "backend down"),
            ProviderError::Unavailable(_)
        ));
    }

    #[test]
    fn account_id_requires_local_id() {
        let body = serde_json::json!({"localId": "uid-1"});
        assert_eq!(account_id(&body).expect("id present").as_str(), "uid-1");
        assert!(account_id(&serde_json::json!({})).is_err());
    }
}
