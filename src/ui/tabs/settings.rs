use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

fn toggle_line(label: &str, on: bool, selected: bool) -> Line<'static> {
    let marker = if on { "[x]" } else { "[ ]" };
    let style = if selected {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(marker.to_string(), styles::highlight_style()),
        Span::styled(format!(" {}", label), style),
    ])
}

/// A toggle the user cannot change; encryption is always on
fn locked_line(label: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled("[x]", styles::muted_style()),
        Span::styled(format!(" {} ", label), styles::muted_style()),
        Span::styled("(always on)", styles::muted_style()),
    ])
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from("")];

    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled("🔒 End-to-end encryption", styles::highlight_style()),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("All messages are protected", styles::muted_style()),
    ]));
    lines.push(locked_line("Message encryption"));
    lines.push(locked_line("Call encryption"));
    lines.push(locked_line("File encryption"));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled("👁 Privacy", styles::highlight_style()),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Control what others can see", styles::muted_style()),
    ]));
    lines.push(toggle_line(
        "Last activity",
        app.privacy.last_seen,
        app.settings_selection == 0,
    ));
    lines.push(toggle_line(
        "Online status",
        app.privacy.online_status,
        app.settings_selection == 1,
    ));
    lines.push(toggle_line(
        "Profile visible to strangers",
        app.privacy.stranger_profile,
        app.settings_selection == 2,
    ));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled("🔑 Security keys", styles::highlight_style()),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Show security QR code", styles::muted_style()),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled("⚠ Delete all data", styles::error_style()),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            "Permanently erase all messages and data",
            styles::muted_style(),
        ),
    ]));

    let block = Block::default()
        .title(" Security Settings ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
