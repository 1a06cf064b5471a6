mod games;
mod help;
mod search;

use crate::app::{App, Tab};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.tab {
        Tab::Search => search::render(app, frame),
        Tab::MyGames => games::render(app, frame),
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// The two-tab strip shown at the top of both views.
fn tab_strip(app: &App, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| {
            let style = if *t == app.tab {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let count = match t {
                Tab::Search => app.results.len(),
                Tab::MyGames => app.collection.len(),
            };
            Line::from(Span::styled(format!("{} ({})", t.label(), count), style))
        })
        .collect();

    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Game Tracker ")
                .title_bottom(
                    Line::from(" [Tab] switch ").style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .highlight_style(Style::default().fg(Color::Cyan));
    frame.render_widget(tabs, area);
}
