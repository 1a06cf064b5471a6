use crate::app::App;
use crate::collection::genre_distribution;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph},
};

const BAR_WIDTH: u16 = 9;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: tabs(3) + chart(10) + games(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    super::tab_strip(app, frame, chunks[0]);
    render_genre_chart(app, frame, chunks[1]);
    render_game_list(app, frame, chunks[2]);

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
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Search  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

/// Genre counts are recomputed from the collection on every frame; nothing
/// is cached, so the chart can never drift from the list below it.
fn render_genre_chart(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Genres ");

    let counts = genre_distribution(app.collection.games());
    if counts.is_empty() {
        let placeholder = Paragraph::new("No data yet — rate and add games from the Search tab")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    // Only as many bars as fit; the rest would render as an empty sliver.
    let capacity = (area.width.saturating_sub(2) / (BAR_WIDTH + 1)).max(1) as usize;
    let bars: Vec<Bar> = counts
        .iter()
        .take(capacity)
        .map(|(genre, count)| {
            Bar::default()
                .value(*count)
                .label(Line::from(super::search::truncate_str(
                    genre,
                    BAR_WIDTH as usize,
                )))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(chart, area);
}

fn render_game_list(app: &App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .collection
        .games()
        .iter()
        .map(|game| {
            let genres = if game.genres.is_empty() {
                String::new()
            } else {
                format!("  [{}]", game.genres.join(", "))
            };
            let mut spans = vec![
                Span::styled(
                    format!("{} ", super::search::stars(game.rating)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(super::search::truncate_str(
                    &game.name,
                    (area.width as usize).saturating_sub(40),
                )),
                Span::styled(genres, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("  added {}", game.added_on.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if let Some(url) = &game.image_url {
                spans.push(Span::styled(
                    format!("  {}", url),
                    Style::default().fg(Color::Blue),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Your Games ({}) ", app.collection.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !app.collection.is_empty() {
        list_state.select(Some(app.games_selected));
    }
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}
