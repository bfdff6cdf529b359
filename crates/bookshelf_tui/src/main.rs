//! Bookshelf terminal UI.
//!
//! Single window binding a three-field form to the catalog store:
//! list, add, update, delete.

mod app;
mod form;
mod mode;
mod view;

use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use bookshelf_core::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    // The terminal owns stdout, so diagnostics go to rolling files.
    if let Err(err) = bookshelf_core::init_logging(&config.log.level, &resolve_log_dir(&config)) {
        eprintln!("bookshelf: logging disabled: {err}");
    }

    // Fail fast on an unreachable or incompatible store before taking over
    // the terminal.
    let mut app = App::new(config.store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| view::render(frame, app.mode, &app.view))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

fn resolve_log_dir(config: &Config) -> String {
    match &config.log.dir {
        Some(dir) => dir.clone(),
        None => std::env::temp_dir()
            .join("bookshelf-logs")
            .to_string_lossy()
            .into_owned(),
    }
}
