use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::models::CallDirection;
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

    let calls = app.filtered_calls();
    for (i, call) in calls.iter().enumerate() {
        let selected = i == app.call_selection;
        let row_style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let marker_style = if call.direction == CallDirection::Missed {
            styles::missed_call_style()
        } else {
            styles::encrypted_style()
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", call.avatar), styles::avatar_style()),
            Span::styled(format!(" {} ", call.name), row_style),
            Span::styled(call.direction.marker(), marker_style),
            Span::styled(format!(" {}", call.direction), styles::muted_style()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(call.time_line(), styles::muted_style()),
        ]));
        lines.push(Line::from(""));
    }

    if calls.is_empty() {
        lines.push(Line::from(Span::styled(
            " No calls match",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Calls ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
