mod app;
mod catalog;
mod collection;
mod config;
mod ui;

use app::{App, InputMode, SearchOutcome, Tab};
use catalog::CatalogClient;
use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::mpsc;

/// TUI for searching the RAWG game catalog and tracking rated games
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Catalog API key (falls back to GAME_TRACKER_API_KEY or the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Catalog search endpoint (falls back to GAME_TRACKER_API_URL or the config file)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Resolve configuration before touching the terminal so a missing
    // credential is an ordinary stderr message, not a mangled TUI frame.
    let config = match config::Config::resolve(cli.api_key, cli.api_url) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    let client = CatalogClient::new(config.api_url, config.api_key);
    let (search_tx, search_rx) = mpsc::channel::<SearchOutcome>();

    let mut app = App::new();

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app, &client, &search_tx, &search_rx).await;
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    client: &CatalogClient,
    search_tx: &mpsc::Sender<SearchOutcome>,
    search_rx: &mpsc::Receiver<SearchOutcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Apply whatever search outcomes arrived since the last frame.
        while let Ok(outcome) = search_rx.try_recv() {
            app.apply_search_outcome(outcome);
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout so in-flight searches keep
        // being drained even while the keyboard is idle.
        if crossterm::event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key, client, search_tx);
            }
        }
    }
}

/// Hand the current query to the catalog client on a background task. The
/// UI stays responsive; the outcome comes back over the channel tagged with
/// its request number.
fn dispatch_search(app: &mut App, client: &CatalogClient, search_tx: &mpsc::Sender<SearchOutcome>) {
    let Some(request) = app.begin_search() else {
        return;
    };
    let client = client.clone();
    let search_tx = search_tx.clone();
    tokio::spawn(async move {
        let result = client.search(&request.query).await;
        // The receiver only goes away on shutdown.
        let _ = search_tx.send(SearchOutcome {
            seq: request.seq,
            result,
        });
    });
}

fn handle_key(
    app: &mut App,
    key: KeyEvent,
    client: &CatalogClient,
    search_tx: &mpsc::Sender<SearchOutcome>,
) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_query_input(app, key, client, search_tx);
        return;
    }

    // Tab strip works from either tab
    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        app.next_tab();
        return;
    }

    match app.tab {
        Tab::Search => handle_search_key(app, key, client, search_tx),
        Tab::MyGames => handle_games_key(app, key),
    }
}

fn handle_query_input(
    app: &mut App,
    key: KeyEvent,
    client: &CatalogClient,
    search_tx: &mpsc::Sender<SearchOutcome>,
) {
    match key.code {
        KeyCode::Enter => {
            // Leaving the input submits it: this is the explicit trigger.
            app.input_mode = InputMode::Normal;
            dispatch_search(app, client, search_tx);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.query_pop();
        }
        KeyCode::Char(c) => {
            app.query_push(c);
        }
        _ => {}
    }
}

fn handle_search_key(
    app: &mut App,
    key: KeyEvent,
    client: &CatalogClient,
    search_tx: &mpsc::Sender<SearchOutcome>,
) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('s') => {
            dispatch_search(app, client, search_tx);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.result_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.result_prev();
        }
        KeyCode::Char(c @ '0'..='5') => {
            // Digits are the only path into the draft, so the [0,5] range
            // holds by construction.
            app.set_rating(c as u8 - b'0');
        }
        KeyCode::Enter | KeyCode::Char('a') => {
            app.add_selected(Local::now());
        }
        _ => {}
    }
}

fn handle_games_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.games_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.games_prev();
        }
        _ => {}
    }
}
