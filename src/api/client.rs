//! Client for the remote authentication service.
//!
//! The service exposes one POST endpoint that multiplexes registration and
//! login on an `action` field. A successful exchange of either kind yields
//! the credential bundle (user id, anonymous id, session token).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::CredentialBundle;

use super::AuthError;

// ============================================================================
// Constants
// ============================================================================

/// Default authentication endpoint
pub const DEFAULT_AUTH_URL: &str =
    "https://functions.poehali.dev/8bec5fb2-d0bf-4853-affb-a9ddaf8079b9";

/// Minimum password length accepted at registration
const MIN_PASSWORD_LEN: usize = 6;

/// Fallback message for non-success register responses without an error body
const REGISTER_FALLBACK: &str = "Registration failed - please try again";

/// Fallback message for non-success login responses without an error body
const LOGIN_FALLBACK: &str = "Invalid ID or password";

/// Request body for the authentication endpoint
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum AuthRequest<'a> {
    Register {
        password: &'a str,
    },
    Login {
        anonymous_id: &'a str,
        password: &'a str,
    },
}

/// Success body returned for both register and login
#[derive(Debug, Deserialize)]
struct AuthResponse {
    user_id: i64,
    anonymous_id: String,
    session_token: String,
}

/// Client for the authentication service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    auth_url: String,
}

impl AuthClient {
    /// Create a client for the given endpoint.
    ///
    /// No request timeout is configured: an exchange waits for the transport
    /// to resolve, and the caller's busy flag blocks resubmission meanwhile.
    pub fn new(auth_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            auth_url: auth_url.into(),
        }
    }

    /// Local preconditions for registration; checked before any network I/O
    pub fn validate_register(password: &str, confirm_password: &str) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if password != confirm_password {
            return Err(AuthError::Validation(
                "Passwords do not match".to_string(),
            ));
        }
        Ok(())
    }

    /// Local preconditions for login; checked before any network I/O
    pub fn validate_login(anonymous_id: &str, password: &str) -> Result<(), AuthError> {
        if anonymous_id.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Anonymous ID and password are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Register a new anonymous account
    pub async fn register(
        &self,
        password: &str,
        confirm_password: &str,
    ) -> Result<CredentialBundle, AuthError> {
        Self::validate_register(password, confirm_password)?;
        self.exchange(&AuthRequest::Register { password }, REGISTER_FALLBACK)
            .await
    }

    /// Log in with an existing anonymous ID.
    /// The ID is sent verbatim; the service tolerates a missing '#' prefix.
    pub async fn login(
        &self,
        anonymous_id: &str,
        password: &str,
    ) -> Result<CredentialBundle, AuthError> {
        Self::validate_login(anonymous_id, password)?;
        self.exchange(
            &AuthRequest::Login {
                anonymous_id,
                password,
            },
            LOGIN_FALLBACK,
        )
        .await
    }

    /// Perform one request/response exchange. No retry on any outcome.
    async fn exchange(
        &self,
        request: &AuthRequest<'_>,
        fallback: &str,
    ) -> Result<CredentialBundle, AuthError> {
        let response = self
            .client
            .post(&self.auth_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, "Auth response received");

        if !status.is_success() {
            return Err(AuthError::from_error_body(&body, fallback));
        }

        let parsed: AuthResponse =
            serde_json::from_str(&body).map_err(AuthError::InvalidResponse)?;

        Ok(CredentialBundle {
            user_id: parsed.user_id,
            anonymous_id: parsed.anonymous_id,
            session_token: parsed.session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "user_id": 42,
            "anonymous_id": "#4782",
            "session_token": "tok-abc"
        })
    }

    #[tokio::test]
    async fn test_register_short_password_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(success_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        let err = client.register("short", "short").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_register_mismatch_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(success_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        let err = client.register("hunter42", "hunter43").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[tokio::test]
    async fn test_login_empty_fields_send_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        for (id, password) in [("", "hunter42"), ("#4782", ""), ("", "")] {
            let err = client.login(id, password).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_register_success_returns_bundle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_json(serde_json::json!({
                "action": "register",
                "password": "hunter42"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        let bundle = client.register("hunter42", "hunter42").await.unwrap();
        assert_eq!(bundle.user_id, 42);
        assert_eq!(bundle.anonymous_id, "#4782");
        assert_eq!(bundle.session_token, "tok-abc");
    }

    #[tokio::test]
    async fn test_login_sends_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({
                "action": "login",
                "anonymous_id": "#4782",
                "password": "hunter42"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        client.login("#4782", "hunter42").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_unauthorized_surfaces_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "bad credentials"})),
            )
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        let err = client.login("#4782", "wrongpass").await.unwrap_err();
        assert!(matches!(err, AuthError::Service(_)));
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[tokio::test]
    async fn test_login_failure_without_body_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        let err = client.login("#4782", "hunter42").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid ID or password");
    }

    #[tokio::test]
    async fn test_success_with_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri());
        let err = client.register("hunter42", "hunter42").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Nothing listens on this port
        let client = AuthClient::new("http://127.0.0.1:9");
        let err = client.login("#4782", "hunter42").await.unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Could not reach server - check your connection"
        );
    }
}
