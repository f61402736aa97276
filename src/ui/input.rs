//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_id_char, can_add_password_char, App, AppState, AuthFocus, AuthMode, Focus, Tab,
};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle the auth screen
    if matches!(app.state, AppState::Auth) {
        return handle_auth_input(app, key);
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle logout confirmation
    if matches!(app.state, AppState::ConfirmingLogout) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.logout();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        return handle_search_input(app, key);
    }

    // The message composer swallows printable keys while focused
    if app.current_tab == Tab::Chats && app.focus == Focus::Composer {
        return handle_composer_input(app, key);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('1') => {
            app.current_tab = Tab::Chats;
            app.focus = Focus::List;
        }
        KeyCode::Char('2') => {
            app.current_tab = Tab::Calls;
            app.focus = Focus::List;
        }
        KeyCode::Char('3') => {
            app.current_tab = Tab::Contacts;
            app.focus = Focus::List;
        }
        KeyCode::Char('4') => {
            app.current_tab = Tab::Profile;
            app.focus = Focus::List;
        }
        KeyCode::Char('5') => {
            app.current_tab = Tab::Settings;
            app.focus = Focus::List;
        }
        KeyCode::Left => {
            app.current_tab = app.current_tab.prev();
            app.focus = Focus::List;
        }
        KeyCode::Right => {
            app.current_tab = app.current_tab.next();
            app.focus = Focus::List;
        }
        KeyCode::Up => app.selection_up(),
        KeyCode::Down => app.selection_down(),
        KeyCode::Char('/') => {
            if matches!(app.current_tab, Tab::Chats | Tab::Calls | Tab::Contacts) {
                app.state = AppState::Searching;
                app.search_query.clear();
            }
        }
        KeyCode::Char(' ') => {
            app.toggle_selected_setting();
        }
        KeyCode::Char('l') => {
            if app.current_tab == Tab::Profile {
                app.state = AppState::ConfirmingLogout;
            }
        }
        KeyCode::Tab | KeyCode::Enter => {
            if app.current_tab == Tab::Chats && app.selected_chat().is_some() {
                app.focus = Focus::Composer;
            }
        }
        _ => {}
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.search_query.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            // Keep the filter applied
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            // A new filter invalidates the old selection
            app.chat_selection = 0;
            app.call_selection = 0;
            app.contact_selection = 0;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_composer_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => {
            app.focus = Focus::List;
        }
        KeyCode::Enter => {
            app.send_message();
        }
        KeyCode::Backspace => {
            app.message_input.pop();
        }
        KeyCode::Char(c) => {
            app.message_input.push(c);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_auth_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit from the auth screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.auth_focus = app.auth_focus.next(app.auth_mode);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.auth_focus = app.auth_focus.prev(app.auth_mode);
        }
        KeyCode::Enter => match app.auth_focus {
            AuthFocus::Submit => app.submit_auth(),
            AuthFocus::SwitchMode => app.toggle_auth_mode(),
            // Enter in a field moves on to the next one
            _ => app.auth_focus = app.auth_focus.next(app.auth_mode),
        },
        KeyCode::Backspace => match app.auth_focus {
            AuthFocus::AnonymousId => {
                app.auth_anonymous_id.pop();
            }
            AuthFocus::Password => {
                app.auth_password.pop();
            }
            AuthFocus::ConfirmPassword => {
                app.auth_confirm_password.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.auth_focus {
            AuthFocus::AnonymousId => {
                if can_add_id_char(&app.auth_anonymous_id) {
                    app.auth_anonymous_id.push(c);
                }
            }
            AuthFocus::Password => {
                if can_add_password_char(&app.auth_password) {
                    app.auth_password.push(c);
                }
            }
            AuthFocus::ConfirmPassword => {
                if can_add_password_char(&app.auth_confirm_password) {
                    app.auth_confirm_password.push(c);
                }
            }
            // 'r' and 'l' jump between the modes from the buttons
            AuthFocus::Submit | AuthFocus::SwitchMode => match (c, app.auth_mode) {
                ('l', AuthMode::Register) | ('r', AuthMode::Login) => app.toggle_auth_mode(),
                _ => {}
            },
        },
        _ => {}
    }

    Ok(false)
}
