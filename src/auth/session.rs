//! Session gate: the durable authenticated/unauthenticated state.
//!
//! Two states, no more: `Unauthenticated` -> (auth success) ->
//! `Authenticated` -> (logout) -> `Unauthenticated`. The state is probed
//! once, synchronously, at startup from the client-local store; there is no
//! network involved and no intermediate loading state.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::storage::Storage;

/// Storage key for the bearer token
const KEY_SESSION_TOKEN: &str = "session_token";

/// Storage key for the numeric user ID (stored as a decimal string)
const KEY_USER_ID: &str = "user_id";

/// Storage key for the public anonymous ID
const KEY_ANONYMOUS_ID: &str = "anonymous_id";

/// The triple that constitutes the authenticated state.
///
/// All three values are opaque, assigned by the external service and
/// trusted as returned. The bundle is immutable once obtained; it is only
/// ever replaced wholesale (re-login) or deleted wholesale (logout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    pub user_id: i64,
    pub anonymous_id: String,
    pub session_token: String,
}

pub struct SessionGate {
    storage: Storage,
    bundle: Option<CredentialBundle>,
    started_at: Option<DateTime<Utc>>,
}

impl SessionGate {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            bundle: None,
            started_at: None,
        }
    }

    /// Probe the store for a persisted bundle. Returns true if one was
    /// restored.
    ///
    /// The bundle counts only if all three keys are present and the user id
    /// parses; anything less is treated as unauthenticated, leaving the
    /// stored values for the next successful auth to overwrite.
    pub fn initialize(&mut self) -> bool {
        let token = self.storage.get(KEY_SESSION_TOKEN);
        let user_id = self.storage.get(KEY_USER_ID);
        let anonymous_id = self.storage.get(KEY_ANONYMOUS_ID);

        match (token, user_id, anonymous_id) {
            (Some(token), Some(user_id), Some(anonymous_id)) => {
                let Ok(user_id) = user_id.parse::<i64>() else {
                    debug!("Stored user_id does not parse, staying unauthenticated");
                    return false;
                };
                self.bundle = Some(CredentialBundle {
                    user_id,
                    anonymous_id: anonymous_id.to_string(),
                    session_token: token.to_string(),
                });
                self.started_at = Some(Utc::now());
                debug!("Session restored from store");
                true
            }
            _ => {
                debug!("No complete credential bundle in store");
                false
            }
        }
    }

    /// Accept the bundle from a successful register/login exchange.
    ///
    /// Persists all three keys in one write, then flips the in-memory
    /// state. The values are trusted as returned by the service.
    pub fn complete_authentication(&mut self, bundle: CredentialBundle) -> anyhow::Result<()> {
        let persisted = self.storage.set_many(&[
            (KEY_SESSION_TOKEN, &bundle.session_token),
            (KEY_USER_ID, &bundle.user_id.to_string()),
            (KEY_ANONYMOUS_ID, &bundle.anonymous_id),
        ]);
        // The in-memory state flips either way; a failed write only costs
        // the restore on next start
        self.bundle = Some(bundle);
        self.started_at = Some(Utc::now());
        persisted
    }

    /// Clear the persisted keys and reset to unauthenticated. Purely
    /// local and idempotent; no network call is made.
    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.storage
            .remove_many(&[KEY_SESSION_TOKEN, KEY_USER_ID, KEY_ANONYMOUS_ID])?;
        self.bundle = None;
        self.started_at = None;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bundle.is_some()
    }

    pub fn bundle(&self) -> Option<&CredentialBundle> {
        self.bundle.as_ref()
    }

    /// When this process entered the authenticated state (display only)
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_in(dir: &std::path::Path) -> SessionGate {
        SessionGate::new(Storage::open(dir.to_path_buf()).unwrap())
    }

    fn sample_bundle() -> CredentialBundle {
        CredentialBundle {
            user_id: 42,
            anonymous_id: "#4782".to_string(),
            session_token: "tok-abc".to_string(),
        }
    }

    #[test]
    fn test_starts_unauthenticated_on_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut gate = gate_in(dir.path());
        assert!(!gate.initialize());
        assert!(!gate.is_authenticated());
        assert_eq!(gate.bundle(), None);
    }

    #[test]
    fn test_complete_authentication_persists_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let mut gate = gate_in(dir.path());
        gate.initialize();
        gate.complete_authentication(sample_bundle()).unwrap();
        assert!(gate.is_authenticated());

        // The persisted entries match the bundle
        let store = Storage::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("session_token"), Some("tok-abc"));
        assert_eq!(store.get("user_id"), Some("42"));
        assert_eq!(store.get("anonymous_id"), Some("#4782"));

        // A fresh gate over the same store restores the session
        let mut restored = gate_in(dir.path());
        assert!(restored.initialize());
        assert_eq!(restored.bundle(), Some(&sample_bundle()));
        assert!(restored.started_at().is_some());
    }

    #[test]
    fn test_prepopulated_store_starts_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = Storage::open(dir.path().to_path_buf()).unwrap();
            store
                .set_many(&[
                    ("session_token", "tok-abc"),
                    ("user_id", "42"),
                    ("anonymous_id", "#4782"),
                ])
                .unwrap();
        }
        let mut gate = gate_in(dir.path());
        assert!(gate.initialize());
        assert_eq!(gate.bundle(), Some(&sample_bundle()));
    }

    #[test]
    fn test_incomplete_bundle_stays_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = Storage::open(dir.path().to_path_buf()).unwrap();
            store
                .set_many(&[("session_token", "tok-abc"), ("user_id", "42")])
                .unwrap();
        }
        let mut gate = gate_in(dir.path());
        assert!(!gate.initialize());
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_unparseable_user_id_stays_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = Storage::open(dir.path().to_path_buf()).unwrap();
            store
                .set_many(&[
                    ("session_token", "tok-abc"),
                    ("user_id", "not-a-number"),
                    ("anonymous_id", "#4782"),
                ])
                .unwrap();
        }
        let mut gate = gate_in(dir.path());
        assert!(!gate.initialize());
    }

    #[test]
    fn test_logout_clears_keys_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut gate = gate_in(dir.path());
        gate.complete_authentication(sample_bundle()).unwrap();

        gate.logout().unwrap();
        assert!(!gate.is_authenticated());
        // Twice in a row is fine
        gate.logout().unwrap();
        assert!(!gate.is_authenticated());

        let store = Storage::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("session_token"), None);
        assert_eq!(store.get("user_id"), None);
        assert_eq!(store.get("anonymous_id"), None);
    }

    #[tokio::test]
    async fn test_register_exchange_ends_authenticated() {
        use crate::api::AuthClient;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "user_id": 42,
                "anonymous_id": "#4782",
                "session_token": "tok-abc"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut gate = gate_in(dir.path());
        gate.initialize();

        let client = AuthClient::new(server.uri());
        let bundle = client.register("hunter42", "hunter42").await.unwrap();
        gate.complete_authentication(bundle).unwrap();

        assert!(gate.is_authenticated());
        assert_eq!(gate.bundle(), Some(&sample_bundle()));
        let store = Storage::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("anonymous_id"), Some("#4782"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_untouched() {
        use crate::api::{AuthClient, AuthError};
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "bad credentials"})),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = AuthClient::new(server.uri());
        let err = client.login("#4782", "wrongpass").await.unwrap_err();
        assert!(matches!(err, AuthError::Service(_)));
        assert_eq!(err.to_string(), "bad credentials");

        let mut gate = gate_in(dir.path());
        assert!(!gate.initialize());
        assert!(!gate.is_authenticated());
    }
}
