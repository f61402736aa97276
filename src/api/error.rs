use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Service(String),

    #[error("Could not reach server - check your connection")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from server")]
    InvalidResponse(#[source] serde_json::Error),
}

/// Error body the service returns on non-success responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl AuthError {
    /// Build a `Service` error from a non-success response body, using the
    /// service-provided message when present and `fallback` otherwise.
    pub fn from_error_body(body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        AuthError::Service(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_from_body() {
        let err = AuthError::from_error_body(r#"{"error": "bad credentials"}"#, "fallback");
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[test]
    fn test_fallback_when_no_error_field() {
        let err = AuthError::from_error_body(r#"{}"#, "Invalid ID or password");
        assert_eq!(err.to_string(), "Invalid ID or password");
    }

    #[test]
    fn test_fallback_when_body_not_json() {
        let err = AuthError::from_error_body("<html>502</html>", "Registration failed");
        assert_eq!(err.to_string(), "Registration failed");
    }

    #[test]
    fn test_fallback_when_error_empty() {
        let err = AuthError::from_error_body(r#"{"error": ""}"#, "fallback");
        assert_eq!(err.to_string(), "fallback");
    }
}
