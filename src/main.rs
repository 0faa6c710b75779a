use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;

use wc_history::config;
use wc_history::dataset::load_snapshot;
use wc_history::render;
use wc_history::state::{AppState, View};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.state.toggle_help(),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.state.next_view(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.state.prev_view(),
            KeyCode::Char(c) => {
                if let Some(view) = View::from_key(c) {
                    self.state.select_view(view);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    config::load_dotenv();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let paths = config::resolve_data_paths(&args);

    // A failed load still opens the dashboard so the error is visible.
    let state = AppState::new(load_snapshot(&paths));
    let mut app = App::new(state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    if let Some(err) = app.state.load_error() {
        eprintln!("Error loading data: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render::draw(f, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
