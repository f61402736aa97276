use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState, Focus};
use crate::ui::styles;
use crate::utils::truncate;

/// Widest the last-message preview gets in the chat list
const PREVIEW_WIDTH: usize = 26;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(area);

    render_chat_list(frame, app, chunks[0]);
    render_chat_window(frame, app, chunks[1]);
}

fn render_chat_list(frame: &mut Frame, app: &App, area: Rect) {
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

    let chats = app.filtered_chats();
    for (i, chat) in chats.iter().enumerate() {
        let selected = i == app.chat_selection;
        let row_style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };

        let mut header = vec![
            Span::styled(format!(" {} ", chat.avatar), styles::avatar_style()),
            Span::styled(format!(" {}", chat.name), row_style),
            Span::raw("  "),
            Span::styled(chat.time.clone(), styles::muted_style()),
        ];
        if chat.has_unread() {
            header.push(Span::raw(" "));
            header.push(Span::styled(
                format!(" {} ", chat.unread),
                styles::unread_badge_style(),
            ));
        }
        lines.push(Line::from(header));

        let mut preview = vec![Span::raw("    ")];
        if chat.encrypted {
            preview.push(Span::styled("🔒 ", styles::encrypted_style()));
        }
        preview.push(Span::styled(
            truncate(&chat.last_message, PREVIEW_WIDTH),
            styles::muted_style(),
        ));
        lines.push(Line::from(preview));
        lines.push(Line::from(""));
    }

    if chats.is_empty() {
        lines.push(Line::from(Span::styled(
            " No chats match",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Chats ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(app.focus == Focus::List));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chat_window(frame: &mut Frame, app: &App, area: Rect) {
    let Some(chat) = app.selected_chat() else {
        render_empty_state(frame, area);
        return;
    };
    let chat = chat.clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Conversation header
            Constraint::Min(4),    // Messages
            Constraint::Length(3), // Composer
        ])
        .split(area);

    // Header: partner name and the E2E banner
    let header_lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", chat.avatar), styles::avatar_style()),
            Span::styled(
                format!(" {}", chat.name),
                styles::list_item_style(),
            ),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled("🛡 Protected by E2E encryption", styles::encrypted_style()),
        ]),
    ];
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // Messages
    let mut lines = vec![
        Line::from(Span::styled("· Today ·", styles::muted_style())).alignment(Alignment::Center),
        Line::from(""),
    ];
    for message in &app.conversation {
        if message.outgoing {
            lines.push(
                Line::from(vec![
                    Span::styled(message.text.clone(), styles::outgoing_bubble_style()),
                    Span::raw(" "),
                ])
                .alignment(Alignment::Right),
            );
            lines.push(
                Line::from(vec![
                    Span::styled(message.time.clone(), styles::muted_style()),
                    Span::raw(" "),
                ])
                .alignment(Alignment::Right),
            );
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", chat.avatar), styles::avatar_style()),
                Span::raw(" "),
                Span::styled(message.text.clone(), styles::incoming_bubble_style()),
            ]));
            lines.push(Line::from(vec![
                Span::raw("      "),
                Span::styled(message.time.clone(), styles::muted_style()),
            ]));
        }
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    // Composer
    let composer_focused = app.focus == Focus::Composer;
    let content = if app.message_input.is_empty() && !composer_focused {
        Line::from(Span::styled(
            "Message is encrypted...",
            styles::muted_style(),
        ))
    } else {
        let cursor = if composer_focused { "▌" } else { "" };
        Line::from(vec![
            Span::styled(app.message_input.clone(), styles::list_item_style()),
            Span::styled(cursor, styles::highlight_style()),
        ])
    };
    let composer_block = Block::default()
        .title(" Message [Enter to send] ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(composer_focused));
    frame.render_widget(Paragraph::new(content).block(composer_block), chunks[2]);
}

fn render_empty_state(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("Select a chat", styles::highlight_style()))
            .alignment(Alignment::Center),
        Line::from(Span::styled(
            "All messages are protected by end-to-end encryption",
            styles::muted_style(),
        ))
        .alignment(Alignment::Center),
    ];
    let block = Block::default()
        .borders(Borders::NONE);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
