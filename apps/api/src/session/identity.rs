//! Identity provider REST client (email/password, OAuth credential exchange,
//! password reset, ID-token lookup). Provider error codes are passed through verbatim.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::errors::AppError;

pub const SERVICE_NAME: &str = "Identity provider";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Message from the provider, e.g. `EMAIL_NOT_FOUND` or `INVALID_PASSWORD`.
    #[error("{0}")]
    Provider(String),

    /// Outage or unexpected reply; not a verdict on the credentials.
    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Provider(msg) => AppError::Auth(msg),
            other => AppError::upstream(SERVICE_NAME, other.to_string()),
        }
    }
}

/// The signed-in account as the rest of the service sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Tokens issued on sign-in / sign-up.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in_secs: u64,
    pub user: AuthUser,
}

/// A credential obtained from an OAuth provider on the client side.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthCredential {
    /// e.g. `google.com`
    pub provider_id: String,
    pub id_token: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OobRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// A 4xx with the provider's `{"error":{"message"}}` body is an auth verdict;
/// anything else is a service failure.
fn classify_failure(method: &str, status: u16, body: &str) -> IdentityError {
    match serde_json::from_str::<ProviderError>(body) {
        Ok(e) if (400..500).contains(&status) => {
            warn!("Identity provider rejected {method}: {}", e.error.message);
            IdentityError::Provider(e.error.message)
        }
        _ => {
            warn!("Identity provider {method} failed with status {status}");
            IdentityError::Status { status }
        }
    }
}

impl TokenResponse {
    fn into_session(self) -> AuthSession {
        AuthSession {
            expires_in_secs: self
                .expires_in
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            user: AuthUser {
                uid: self.local_id,
                email: self.email.unwrap_or_default(),
                display_name: self.display_name,
            },
        }
    }
}

#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, IdentityError> {
        let url = format!(
            "{}/v1/accounts:{method}",
            self.base_url.trim_end_matches('/')
        );
        debug!("Identity provider call: {method}");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(method, status.as_u16(), &text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let token: TokenResponse = self.call("signUp", &body).await?;
        Ok(token.into_session())
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, IdentityError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let token: TokenResponse = self.call("signInWithPassword", &body).await?;
        Ok(token.into_session())
    }

    /// Exchanges an OAuth provider credential for a session.
    pub async fn sign_in_with_idp(
        &self,
        credential: &OAuthCredential,
        request_uri: &str,
    ) -> Result<AuthSession, IdentityError> {
        // The serializer is !Send, so it must not live across the await below.
        let post_body = {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            match (&credential.id_token, &credential.access_token) {
                (Some(id_token), _) => serializer.append_pair("id_token", id_token),
                (None, Some(access_token)) => serializer.append_pair("access_token", access_token),
                (None, None) => {
                    return Err(IdentityError::Provider(
                        "MISSING_OAUTH_CREDENTIAL".to_string(),
                    ))
                }
            };
            serializer.append_pair("providerId", &credential.provider_id);
            serializer.finish()
        };

        let body = IdpRequest {
            post_body,
            request_uri,
            return_secure_token: true,
            return_idp_credential: true,
        };
        let token: TokenResponse = self.call("signInWithIdp", &body).await?;
        Ok(token.into_session())
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let body = OobRequest {
            request_type: "PASSWORD_RESET",
            email,
        };
        let _: serde_json::Value = self.call("sendOobCode", &body).await?;
        Ok(())
    }

    /// Verifies an ID token with the provider and returns its account.
    pub async fn lookup(&self, id_token: &str) -> Result<AuthUser, IdentityError> {
        let response: LookupResponse = self.call("lookup", &LookupRequest { id_token }).await?;
        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| IdentityError::Provider("USER_NOT_FOUND".to_string()))?;
        Ok(AuthUser {
            uid: user.local_id,
            email: user.email.unwrap_or_default(),
            display_name: user.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_into_session() {
        let json = r#"{
            "idToken": "tok",
            "refreshToken": "ref",
            "expiresIn": "1800",
            "localId": "uid-7",
            "email": "a@b.c"
        }"#;
        let session = serde_json::from_str::<TokenResponse>(json)
            .unwrap()
            .into_session();
        assert_eq!(session.expires_in_secs, 1800);
        assert_eq!(session.user.uid, "uid-7");
        assert_eq!(session.user.display_name, None);
    }

    #[test]
    fn test_provider_message_becomes_auth_error() {
        let err: AppError = IdentityError::Provider("EMAIL_EXISTS".to_string()).into();
        assert!(matches!(err, AppError::Auth(msg) if msg == "EMAIL_EXISTS"));
    }

    #[test]
    fn test_only_provider_4xx_is_an_auth_verdict() {
        let body = r#"{"error": {"code": 400, "message": "INVALID_PASSWORD"}}"#;
        assert!(matches!(
            classify_failure("signInWithPassword", 400, body),
            IdentityError::Provider(msg) if msg == "INVALID_PASSWORD"
        ));
        assert!(matches!(
            classify_failure("signInWithPassword", 503, body),
            IdentityError::Status { status: 503 }
        ));
        assert!(matches!(
            classify_failure("lookup", 400, "<html>bad gateway</html>"),
            IdentityError::Status { status: 400 }
        ));
    }

    #[test]
    fn test_status_failure_is_upstream_error() {
        let err: AppError = IdentityError::Status { status: 503 }.into();
        assert!(matches!(err, AppError::Upstream { .. }));
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_oauth_exchange_future_is_send() {
        let client = IdentityClient::new(
            Client::new(),
            "http://127.0.0.1:9".to_string(),
            "test-key".to_string(),
        );
        let credential = OAuthCredential {
            provider_id: "google.com".to_string(),
            id_token: Some("jwt".to_string()),
            access_token: None,
        };
        let future = client.sign_in_with_idp(&credential, "http://localhost");
        assert_send(&future);
    }

    #[test]
    fn test_malformed_response_is_upstream_error() {
        let err: AppError = IdentityError::Malformed("bad json".to_string()).into();
        assert!(matches!(err, AppError::Upstream { .. }));
    }
}
