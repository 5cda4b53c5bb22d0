mod config;
mod error;
mod game;
mod geometry;
mod host;
mod palette;
mod snake;

use config::{Settings, LOG_FILE};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::Game;
use log::{error, info};
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Set up logging before anything else
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .expect("Failed to initialize logger");

    let settings = Settings::from_env()?;
    info!(
        "Starting {}: {}x{} field at {} ticks/s",
        settings.title, settings.field.width, settings.field.height, settings.tick_rate
    );

    // Setup terminal. Raw mode is undone below even if the rest fails.
    enable_raw_mode()?;
    let result = setup_terminal().and_then(|mut terminal| run(&mut terminal, settings));

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;

    match &result {
        Ok(()) => info!("Exiting"),
        Err(e) => error!("Fatal: {:#}", e),
    }
    result
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: Settings,
) -> anyhow::Result<()> {
    let tick_period = settings.tick_period();
    let mut game = Game::new(settings);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| game.render(f))?;

        // Every key seen before the deadline lands in this tick's sample
        let timeout = tick_period.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    game.handle_input(key)?;
                }
            }
        }

        if last_tick.elapsed() >= tick_period {
            game.update()?;
            last_tick = Instant::now();
        }

        if game.is_exit() {
            break;
        }
    }

    Ok(())
}
