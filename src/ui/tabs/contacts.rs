use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    if matches!(app.state, AppState::Searching) || !app.search_query.is_empty() {
        let cursor = if matches!(app.state, AppState::Searching) {
            "▌"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(" Search: ", styles::muted_style()),
            Span::styled(format!("{}{}", app.search_query, cursor), styles::search_style()),
        ]));
        lines.push(Line::from(""));
    }

    // Contacts are the chat partners
    let contacts = app.filtered_chats();
    for (i, contact) in contacts.iter().enumerate() {
        let selected = i == app.contact_selection;
        let row_style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", contact.avatar), styles::avatar_style()),
            Span::styled(format!(" {}", contact.name), row_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled("🛡 ", styles::encrypted_style()),
            Span::styled("E2E encryption", styles::muted_style()),
        ]));
        lines.push(Line::from(""));
    }

    if contacts.is_empty() {
        lines.push(Line::from(Span::styled(
            " No contacts match",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Contacts ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
