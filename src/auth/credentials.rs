use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "veil";

/// OS-keychain storage for the account password, keyed by anonymous ID.
///
/// Convenience only: the session gate never consults the keychain, it only
/// feeds the login form prefill for a returning user.
pub struct CredentialStore;

impl CredentialStore {
    /// Store the password for an anonymous ID in the OS keychain
    pub fn store(anonymous_id: &str, password: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, anonymous_id)
            .context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Retrieve the password for an anonymous ID from the OS keychain
    pub fn get_password(anonymous_id: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, anonymous_id)
            .context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Check if a password is stored for an anonymous ID
    pub fn has_credentials(anonymous_id: &str) -> bool {
        if let Ok(entry) = Entry::new(SERVICE_NAME, anonymous_id) {
            entry.get_password().is_ok()
        } else {
            false
        }
    }
}
