mod app;
mod handler;
mod tui;
mod ui;

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use commander_core::Config;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::tui::{EventHandler, Tui};

const DEFAULT_LOG_FILTER: &str = "commander_core=info,commander=info";

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal is busy drawing, so logs go to a file
    init_logging()?;

    let config = Config::load();

    let mut app = App::new(&config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .context("Could not find local data directory")?
        .join("solar-commander");
    fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("commander.log"))
        .with_context(|| format!("Could not open log file in {}", log_dir.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
