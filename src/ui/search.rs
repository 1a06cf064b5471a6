use crate::app::{App, InputMode, RatingDraft};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: tabs(3) + query(3) + results(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    super::tab_strip(app, frame, chunks[0]);

    // ── Query bar ──
    let query_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let query_label = if app.input_mode == InputMode::Editing {
        " 🔍 Query (Enter to search, Esc to cancel): "
    } else {
        " 🔍 Query (/): "
    };
    let query_text = format!("{}{}", query_label, app.query);
    let query_bar = Paragraph::new(query_text).style(query_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(query_style)
            .title(" Search the catalog "),
    );
    frame.render_widget(query_bar, chunks[1]);

    // Set cursor position when editing
    if app.input_mode == InputMode::Editing {
        let cursor_x =
            chunks[1].x + query_label.width() as u16 + app.query.as_str().width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    // ── Result list ──
    let items: Vec<ListItem> = app
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let art_indicator = if result.image_url.is_some() { "●" } else { "○" };
            let genres = if result.genres.is_empty() {
                String::new()
            } else {
                format!("  [{}]", result.genres.join(", "))
            };
            let mut spans = vec![
                Span::styled(
                    format!("{} ", art_indicator),
                    Style::default().fg(if result.image_url.is_some() {
                        Color::Green
                    } else {
                        Color::DarkGray
                    }),
                ),
                Span::raw(truncate_str(
                    &result.name,
                    (area.width as usize).saturating_sub(40),
                )),
                Span::styled(genres, Style::default().fg(Color::DarkGray)),
            ];
            if i == app.result_selected && app.rating.is_set() {
                spans.push(Span::styled(
                    format!("  {}", stars(app.rating.value())),
                    Style::default().fg(Color::Yellow),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.loading {
        " Results (searching…) "
    } else {
        " Results "
    };

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !app.results.is_empty() {
        list_state.select(Some(app.result_selected));
    }
    frame.render_stateful_widget(list_widget, chunks[2], &mut list_state);

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ↑↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Navigate  "),
        Span::styled(
            "/",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Query  "),
        Span::styled(
            "0-5",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Rate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Add  "),
        Span::styled(
            "?",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Help  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

/// "★★★☆☆" for a 0-5 rating.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(RatingDraft::MAX));
    let mut out = "★".repeat(filled);
    out.push_str(&"☆".repeat(usize::from(RatingDraft::MAX) - filled));
    out
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}
