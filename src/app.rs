//! Application state management for Veil.
//!
//! This module contains the core `App` struct that manages all application
//! state: the session gate, the auth form, tab/selection view state, and
//! the background auth-exchange coordination.

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::AuthClient;
use crate::auth::{CredentialBundle, CredentialStore, SessionGate};
use crate::config::Config;
use crate::models::{sample, Call, Chat, Message};
use crate::storage::Storage;
use crate::utils::contains_ignore_case;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the auth result channel.
/// Only one exchange is ever outstanding, so 1 would do; a little headroom
/// costs nothing.
const CHANNEL_BUFFER_SIZE: usize = 4;

/// Maximum length for the anonymous ID input.
/// IDs are '#' plus four digits today; 16 covers any future widening.
const MAX_ID_LENGTH: usize = 16;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Check if another character fits in the anonymous ID field
pub fn can_add_id_char(current: &str) -> bool {
    current.chars().count() < MAX_ID_LENGTH
}

/// Check if another character fits in a password field
pub fn can_add_password_char(current: &str) -> bool {
    current.chars().count() < MAX_PASSWORD_LENGTH
}

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chats,
    Calls,
    Contacts,
    Profile,
    Settings,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Chats => "Chats",
            Tab::Calls => "Calls",
            Tab::Contacts => "Contacts",
            Tab::Profile => "Profile",
            Tab::Settings => "Settings",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Chats => Tab::Calls,
            Tab::Calls => Tab::Contacts,
            Tab::Contacts => Tab::Profile,
            Tab::Profile => Tab::Settings,
            Tab::Settings => Tab::Chats,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Chats => Tab::Settings,
            Tab::Calls => Tab::Chats,
            Tab::Contacts => Tab::Calls,
            Tab::Profile => Tab::Contacts,
            Tab::Settings => Tab::Profile,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Unauthenticated: the auth screen owns the terminal
    Auth,
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingQuit,
    ConfirmingLogout,
    Quitting,
}

/// Which exchange the auth form performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Register,
    Login,
}

/// Auth form focus state.
///
/// Register mode cycles Password -> ConfirmPassword -> Submit -> SwitchMode;
/// login mode cycles AnonymousId -> Password -> Submit -> SwitchMode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    AnonymousId,
    Password,
    ConfirmPassword,
    Submit,
    SwitchMode,
}

impl AuthFocus {
    pub fn next(&self, mode: AuthMode) -> Self {
        match mode {
            AuthMode::Register => match self {
                AuthFocus::Password => AuthFocus::ConfirmPassword,
                AuthFocus::ConfirmPassword => AuthFocus::Submit,
                AuthFocus::Submit => AuthFocus::SwitchMode,
                _ => AuthFocus::Password,
            },
            AuthMode::Login => match self {
                AuthFocus::AnonymousId => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Submit,
                AuthFocus::Submit => AuthFocus::SwitchMode,
                _ => AuthFocus::AnonymousId,
            },
        }
    }

    pub fn prev(&self, mode: AuthMode) -> Self {
        match mode {
            AuthMode::Register => match self {
                AuthFocus::Password => AuthFocus::SwitchMode,
                AuthFocus::ConfirmPassword => AuthFocus::Password,
                AuthFocus::Submit => AuthFocus::ConfirmPassword,
                _ => AuthFocus::Submit,
            },
            AuthMode::Login => match self {
                AuthFocus::AnonymousId => AuthFocus::SwitchMode,
                AuthFocus::Password => AuthFocus::AnonymousId,
                AuthFocus::Submit => AuthFocus::Password,
                _ => AuthFocus::Submit,
            },
        }
    }
}

/// Current focus on the Chats tab (chat list or message composer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Composer,
}

/// Privacy and notification toggles.
///
/// Transient view state: nothing here is persisted or sent anywhere.
#[derive(Debug, Clone)]
pub struct Privacy {
    pub online_status: bool,
    pub show_avatar: bool,
    pub read_receipts: bool,
    pub last_seen: bool,
    pub stranger_profile: bool,
}

impl Default for Privacy {
    fn default() -> Self {
        Self {
            online_status: true,
            show_avatar: false,
            read_receipts: true,
            last_seen: false,
            stranger_profile: false,
        }
    }
}

/// Number of toggle rows on the Profile tab
pub const PROFILE_TOGGLE_COUNT: usize = 3;

/// Number of toggle rows on the Settings tab
pub const SETTINGS_TOGGLE_COUNT: usize = 3;

// ============================================================================
// Background Task Results
// ============================================================================

/// Result of the one in-flight auth exchange, sent back over the channel.
enum AuthOutcome {
    /// The exchange succeeded; `registered` distinguishes the two
    /// confirmation messages, `password` feeds the keychain store.
    Success {
        bundle: CredentialBundle,
        registered: bool,
        password: String,
    },
    /// User-facing failure message (validation, service, or transport)
    Failure(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub gate: SessionGate,
    pub api: AuthClient,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub focus: Focus,
    pub search_query: String,

    // Auth form state
    pub auth_mode: AuthMode,
    pub auth_focus: AuthFocus,
    pub auth_anonymous_id: String,
    pub auth_password: String,
    pub auth_confirm_password: String,
    pub auth_error: Option<String>,
    /// An exchange is in flight; resubmission is blocked until it resolves
    pub auth_busy: bool,

    // Shell content (sample data, no lifecycle)
    pub chats: Vec<Chat>,
    pub calls: Vec<Call>,
    pub conversation: Vec<Message>,

    // Selection indices
    pub chat_selection: usize,
    pub call_selection: usize,
    pub contact_selection: usize,
    pub profile_selection: usize,
    pub settings_selection: usize,

    pub message_input: String,
    pub privacy: Privacy,

    // Background task channel
    auth_rx: mpsc::Receiver<AuthOutcome>,
    auth_tx: mpsc::Sender<AuthOutcome>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance.
    ///
    /// Probes the session gate synchronously; the caller routes to the auth
    /// screen if no session was restored. No network I/O happens here.
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let data_dir = config
            .data_dir()
            .unwrap_or_else(|_| PathBuf::from("./veil-data"));
        debug!(?data_dir, "Data directory configured");

        let storage = match Storage::open(data_dir.clone()) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to open credential store, starting empty");
                Storage::empty(data_dir)
            }
        };

        let mut gate = SessionGate::new(storage);
        let restored = gate.initialize();
        debug!(restored, "Session gate initialized");

        let api = AuthClient::new(config.auth_url());

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill the login form for a returning user
        let auth_anonymous_id = std::env::var("VEIL_ANONYMOUS_ID")
            .ok()
            .or_else(|| config.last_anonymous_id.clone())
            .unwrap_or_default();

        let auth_password = std::env::var("VEIL_PASSWORD").ok().unwrap_or_else(|| {
            if !auth_anonymous_id.is_empty() && CredentialStore::has_credentials(&auth_anonymous_id)
            {
                CredentialStore::get_password(&auth_anonymous_id).unwrap_or_default()
            } else {
                String::new()
            }
        });

        let auth_mode = if auth_anonymous_id.is_empty() {
            AuthMode::Register
        } else {
            AuthMode::Login
        };

        Ok(Self {
            config,
            gate,
            api,

            state: AppState::Normal,
            current_tab: Tab::Chats,
            focus: Focus::List,
            search_query: String::new(),

            auth_mode,
            auth_focus: AuthFocus::Password,
            auth_anonymous_id,
            auth_password,
            auth_confirm_password: String::new(),
            auth_error: None,
            auth_busy: false,

            chats: sample::chats(),
            calls: sample::calls(),
            conversation: sample::conversation(),

            chat_selection: 0,
            call_selection: 0,
            contact_selection: 0,
            profile_selection: 0,
            settings_selection: 0,

            message_input: String::new(),
            privacy: Privacy::default(),

            auth_rx: rx,
            auth_tx: tx,

            status_message: None,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check if the user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// Show the auth screen
    pub fn start_auth(&mut self) {
        self.state = AppState::Auth;
        self.auth_error = None;
        self.auth_focus = match self.auth_mode {
            AuthMode::Register => AuthFocus::Password,
            AuthMode::Login if self.auth_anonymous_id.is_empty() => AuthFocus::AnonymousId,
            AuthMode::Login => AuthFocus::Password,
        };
    }

    /// Switch between register and login mode, clearing all input fields
    pub fn toggle_auth_mode(&mut self) {
        self.auth_mode = match self.auth_mode {
            AuthMode::Register => AuthMode::Login,
            AuthMode::Login => AuthMode::Register,
        };
        self.auth_anonymous_id.clear();
        self.auth_password.clear();
        self.auth_confirm_password.clear();
        self.auth_error = None;
        self.auth_focus = match self.auth_mode {
            AuthMode::Register => AuthFocus::Password,
            AuthMode::Login => AuthFocus::AnonymousId,
        };
    }

    /// Submit the auth form.
    ///
    /// Validation failures surface immediately and never reach the network.
    /// Otherwise a single exchange is spawned; while it is in flight
    /// `auth_busy` blocks any further submit.
    pub fn submit_auth(&mut self) {
        if self.auth_busy {
            return;
        }

        let validation = match self.auth_mode {
            AuthMode::Register => {
                AuthClient::validate_register(&self.auth_password, &self.auth_confirm_password)
            }
            AuthMode::Login => {
                AuthClient::validate_login(&self.auth_anonymous_id, &self.auth_password)
            }
        };
        if let Err(e) = validation {
            self.auth_error = Some(e.to_string());
            return;
        }

        self.auth_error = None;
        self.auth_busy = true;

        let api = self.api.clone();
        let tx = self.auth_tx.clone();
        let mode = self.auth_mode;
        let anonymous_id = self.auth_anonymous_id.clone();
        let password = self.auth_password.clone();
        let confirm_password = self.auth_confirm_password.clone();

        tokio::spawn(async move {
            let result = match mode {
                AuthMode::Register => api.register(&password, &confirm_password).await,
                AuthMode::Login => api.login(&anonymous_id, &password).await,
            };

            let outcome = match result {
                Ok(bundle) => AuthOutcome::Success {
                    bundle,
                    registered: mode == AuthMode::Register,
                    password,
                },
                Err(e) => {
                    error!(error = %e, "Auth exchange failed");
                    AuthOutcome::Failure(e.to_string())
                }
            };

            if tx.send(outcome).await.is_err() {
                error!("Failed to send auth outcome - channel closed");
            }
        });
    }

    /// Drain completed background work (called every event-loop tick)
    pub fn check_background_tasks(&mut self) {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.auth_rx.try_recv() {
            outcomes.push(outcome);
        }
        for outcome in outcomes {
            self.process_auth_outcome(outcome);
        }
    }

    fn process_auth_outcome(&mut self, outcome: AuthOutcome) {
        self.auth_busy = false;
        match outcome {
            AuthOutcome::Success {
                bundle,
                registered,
                password,
            } => {
                if let Err(e) = CredentialStore::store(&bundle.anonymous_id, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_anonymous_id = Some(bundle.anonymous_id.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.status_message = Some(if registered {
                    format!(
                        "Registration successful! Your anonymous ID: {}",
                        bundle.anonymous_id
                    )
                } else {
                    format!("Welcome back, {}", bundle.anonymous_id)
                });

                if let Err(e) = self.gate.complete_authentication(bundle) {
                    warn!(error = %e, "Failed to persist session");
                }

                self.auth_password.clear();
                self.auth_confirm_password.clear();
                self.state = AppState::Normal;
                self.current_tab = Tab::Chats;
                self.focus = Focus::List;
                info!("Authentication successful");
            }
            AuthOutcome::Failure(message) => {
                self.auth_error = Some(message);
            }
        }
    }

    /// Log out: clear the persisted bundle and return to the auth screen
    pub fn logout(&mut self) {
        if let Err(e) = self.gate.logout() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        info!("Logged out");

        self.status_message = None;
        self.search_query.clear();
        self.message_input.clear();
        self.auth_mode = AuthMode::Login;
        self.auth_anonymous_id = self.config.last_anonymous_id.clone().unwrap_or_default();
        self.auth_password.clear();
        self.auth_confirm_password.clear();
        self.start_auth();
    }

    // =========================================================================
    // Shell state
    // =========================================================================

    /// Chats matching the search query (all chats when not searching)
    pub fn filtered_chats(&self) -> Vec<&Chat> {
        self.chats
            .iter()
            .filter(|c| {
                self.search_query.is_empty()
                    || contains_ignore_case(&c.name, &self.search_query)
                    || contains_ignore_case(&c.last_message, &self.search_query)
            })
            .collect()
    }

    /// Calls matching the search query
    pub fn filtered_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| {
                self.search_query.is_empty() || contains_ignore_case(&c.name, &self.search_query)
            })
            .collect()
    }

    /// The chat highlighted in the list, if any
    pub fn selected_chat(&self) -> Option<&Chat> {
        self.filtered_chats().get(self.chat_selection).copied()
    }

    /// "Send" the composed message. There is no transport; sending only
    /// clears the input field.
    pub fn send_message(&mut self) {
        if !self.message_input.is_empty() {
            debug!("Composer cleared");
            self.message_input.clear();
        }
    }

    /// Number of selectable rows on the current tab
    fn selection_len(&self) -> usize {
        match self.current_tab {
            Tab::Chats => self.filtered_chats().len(),
            Tab::Calls => self.filtered_calls().len(),
            Tab::Contacts => self.filtered_chats().len(),
            Tab::Profile => PROFILE_TOGGLE_COUNT,
            Tab::Settings => SETTINGS_TOGGLE_COUNT,
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.current_tab {
            Tab::Chats => &mut self.chat_selection,
            Tab::Calls => &mut self.call_selection,
            Tab::Contacts => &mut self.contact_selection,
            Tab::Profile => &mut self.profile_selection,
            Tab::Settings => &mut self.settings_selection,
        }
    }

    pub fn selection_up(&mut self) {
        let selection = self.selection_mut();
        *selection = selection.saturating_sub(1);
    }

    pub fn selection_down(&mut self) {
        let max = self.selection_len().saturating_sub(1);
        let selection = self.selection_mut();
        *selection = (*selection + 1).min(max);
    }

    /// Flip the highlighted toggle on the Profile or Settings tab
    pub fn toggle_selected_setting(&mut self) {
        match self.current_tab {
            Tab::Profile => match self.profile_selection {
                0 => self.privacy.online_status = !self.privacy.online_status,
                1 => self.privacy.show_avatar = !self.privacy.show_avatar,
                _ => self.privacy.read_receipts = !self.privacy.read_receipts,
            },
            Tab::Settings => match self.settings_selection {
                0 => self.privacy.last_seen = !self.privacy.last_seen,
                1 => self.privacy.online_status = !self.privacy.online_status,
                _ => self.privacy.stranger_profile = !self.privacy.stranger_profile,
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_round_trips() {
        let mut tab = Tab::Chats;
        for _ in 0..5 {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Chats);
        for _ in 0..5 {
            tab = tab.prev();
        }
        assert_eq!(tab, Tab::Chats);
    }

    #[test]
    fn test_auth_focus_cycle_register() {
        let order = [
            AuthFocus::Password,
            AuthFocus::ConfirmPassword,
            AuthFocus::Submit,
            AuthFocus::SwitchMode,
            AuthFocus::Password,
        ];
        for pair in order.windows(2) {
            assert_eq!(pair[0].next(AuthMode::Register), pair[1]);
            assert_eq!(pair[1].prev(AuthMode::Register), pair[0]);
        }
    }

    #[test]
    fn test_auth_focus_cycle_login() {
        let order = [
            AuthFocus::AnonymousId,
            AuthFocus::Password,
            AuthFocus::Submit,
            AuthFocus::SwitchMode,
            AuthFocus::AnonymousId,
        ];
        for pair in order.windows(2) {
            assert_eq!(pair[0].next(AuthMode::Login), pair[1]);
            assert_eq!(pair[1].prev(AuthMode::Login), pair[0]);
        }
    }

    #[test]
    fn test_input_length_guards() {
        assert!(can_add_id_char("#4782"));
        assert!(!can_add_id_char(&"x".repeat(MAX_ID_LENGTH)));
        assert!(can_add_password_char("hunter42"));
        assert!(!can_add_password_char(&"x".repeat(MAX_PASSWORD_LENGTH)));
    }
}
