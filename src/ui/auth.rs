//! Full-screen authentication card (register / login).

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AuthFocus, AuthMode};

use super::styles;

/// Card width; fields are sized to fit its interior
const CARD_WIDTH: u16 = 50;

/// Visible width of the input fields
const FIELD_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &App) {
    let height = card_height(app);
    let area = centered_rect_fixed(CARD_WIDTH, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = vec![];

    // ASCII art logo (centered for 50-width box)
    lines.push(Line::from(Span::styled(
        "             ╦  ╦╔═╗╦╦  ",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "             ╚╗╔╝║╣ ║║  ",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "              ╚╝ ╚═╝╩╩═╝",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "       Anonymous messenger with E2E",
        styles::muted_style(),
    )));
    lines.push(Line::from(""));

    match app.auth_mode {
        AuthMode::Login => {
            lines.push(field_line(
                "      ID: ",
                &app.auth_anonymous_id,
                false,
                app.auth_focus == AuthFocus::AnonymousId,
            ));
            lines.push(field_line(
                "Password: ",
                &app.auth_password,
                true,
                app.auth_focus == AuthFocus::Password,
            ));
        }
        AuthMode::Register => {
            lines.push(field_line(
                "Password: ",
                &app.auth_password,
                true,
                app.auth_focus == AuthFocus::Password,
            ));
            lines.push(field_line(
                " Confirm: ",
                &app.auth_confirm_password,
                true,
                app.auth_focus == AuthFocus::ConfirmPassword,
            ));
        }
    }

    lines.push(Line::from(""));
    lines.push(button_line(app));
    lines.push(switch_mode_line(app));

    if app.auth_busy {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "   Authenticating...",
            styles::highlight_style(),
        )));
    } else if let Some(ref error) = app.auth_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   {}", error),
            styles::error_style(),
        )));
    }

    if app.auth_mode == AuthMode::Register {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("   🛡 ", styles::encrypted_style()),
            Span::styled(
                "Registration assigns you an anonymous ID.",
                styles::muted_style(),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            "     Save it with your password - it is the",
            styles::muted_style(),
        )));
        lines.push(Line::from(Span::styled(
            "     only way into your account.",
            styles::muted_style(),
        )));
        lines.push(Line::from(vec![
            Span::styled("   🔒 ", styles::encrypted_style()),
            Span::styled(
                "All messages are encrypted end-to-end.",
                styles::muted_style(),
            ),
        ]));
    }

    let title = match app.auth_mode {
        AuthMode::Register => " Register ",
        AuthMode::Login => " Log in ",
    };
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn card_height(app: &App) -> u16 {
    // logo+tagline+blank (5) + fields (2) + blank+button+switch (3) + borders (2)
    let mut height = 12;
    if app.auth_busy || app.auth_error.is_some() {
        height += 2;
    }
    if app.auth_mode == AuthMode::Register {
        height += 5;
    }
    height
}

fn field_line(label: &str, value: &str, masked: bool, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let shown: String = if masked {
        "*".repeat(value.chars().count().min(FIELD_WIDTH))
    } else {
        value.chars().take(FIELD_WIDTH).collect()
    };
    let display = format!("{:<width$}", shown, width = FIELD_WIDTH);
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("{}[", label), styles::muted_style()),
        Span::styled(format!("{}{}", display, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

fn button_line(app: &App) -> Line<'static> {
    let label = match app.auth_mode {
        AuthMode::Register => "Register",
        AuthMode::Login => "Log in",
    };
    let focused = app.auth_focus == AuthFocus::Submit;
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let text = if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    Line::from(vec![
        Span::raw("              ["),
        Span::styled(text, style),
        Span::raw("]"),
    ])
}

fn switch_mode_line(app: &App) -> Line<'static> {
    let label = match app.auth_mode {
        AuthMode::Register => "Already have an account? Log in",
        AuthMode::Login => "No account? Register",
    };
    let style = if app.auth_focus == AuthFocus::SwitchMode {
        styles::selected_style()
    } else {
        styles::muted_style()
    };
    Line::from(vec![
        Span::raw("      "),
        Span::styled(label.to_string(), style),
    ])
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
