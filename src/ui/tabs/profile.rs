use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{avatar_tag, format_session_age};

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

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from("")];

    // The gate is authenticated whenever this tab is reachable
    if let Some(bundle) = app.gate.bundle() {
        lines.push(
            Line::from(Span::styled(
                format!("  {}  ", avatar_tag(&bundle.anonymous_id)),
                styles::avatar_style(),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                format!("Anonymous {}", bundle.anonymous_id),
                styles::title_style(),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled("Your unique ID", styles::muted_style()))
                .alignment(Alignment::Center),
        );
        if let Some(started_at) = app.gate.started_at() {
            lines.push(
                Line::from(Span::styled(
                    format!("Signed in {}", format_session_age(started_at)),
                    styles::muted_style(),
                ))
                .alignment(Alignment::Center),
            );
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Protected profile",
        styles::highlight_style(),
    )));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("🛡 E2E encryption active ", styles::encrypted_style()),
        Span::styled(" Active ", styles::unread_badge_style()),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        " Visibility",
        styles::highlight_style(),
    )));
    lines.push(toggle_line(
        "Online status",
        app.privacy.online_status,
        app.profile_selection == 0,
    ));
    lines.push(toggle_line(
        "Show avatar",
        app.privacy.show_avatar,
        app.profile_selection == 1,
    ));
    lines.push(toggle_line(
        "Read receipts",
        app.privacy.read_receipts,
        app.profile_selection == 2,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[Space]", styles::help_key_style()),
        Span::styled(" toggle   ", styles::muted_style()),
        Span::styled("[l]", styles::help_key_style()),
        Span::styled(" log out", styles::muted_style()),
    ]));

    let block = Block::default()
        .title(" Profile ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
