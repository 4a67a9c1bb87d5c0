//! LazyStomp - a terminal client for testing STOMP-over-WebSocket endpoints.
//!
//! Connect to a broker, send frames to destinations, subscribe to topics and
//! inspect everything that went over the wire in a resizable table.

mod app;
mod config;
mod error;
mod events;
mod logging;
mod stomp;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use crate::app::App;
use crate::config::{BodyMode, Settings};
use crate::error::AppError;
use crate::events::{Event, EventHandler};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lazystomp", version, about)]
struct Args {
    /// Broker URL to pre-fill, e.g. ws://localhost:8080/ws
    url: Option<String>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start the body editor in raw mode instead of JSON
    #[arg(long)]
    raw: bool,

    /// Log level for this application (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Write a config file with default settings and exit
    #[arg(long)]
    init_config: bool,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => config::config_path()?,
    };

    if args.init_config {
        Settings::default().save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    logging::init(args.log_level.as_deref())?;

    // A broken config file must not keep the client from starting
    let (settings, config_error) = match Settings::load_from(&config_path) {
        Ok(settings) => (settings, None),
        Err(e) => {
            warn!(error = %e, path = %config_path.display(), "Failed to load config, using defaults");
            (Settings::default(), Some(AppError::from(e)))
        }
    };

    let url = args.url.clone().or_else(|| settings.default_url.clone());
    let body_mode = if args.raw {
        BodyMode::Raw
    } else {
        settings.body_mode
    };
    let handler = EventHandler::with_tick_rate(settings.tick_rate_ms);

    let mut app = App::new(settings, url, body_mode);
    if let Some(e) = config_error {
        app.handle_error(&e);
    }

    let mut terminal = setup_terminal().context("Failed to set up the terminal")?;
    let result = run(&mut terminal, &mut app, &handler);
    restore_terminal(&mut terminal).context("Failed to restore the terminal")?;

    if let Err(e) = &result {
        error!(error = %e, "Exited with error");
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs are in {}", dir.display());
        }
    }
    logging::shutdown();
    result
}

/// Draw, read input, apply broker events; until the user quits.
fn run(terminal: &mut Tui, app: &mut App, handler: &EventHandler) -> anyhow::Result<()> {
    info!("Entering main loop");
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;

        let event = handler.next()?;
        if event != Event::Tick {
            app.update(event);
        }
        // Always tick so debounces and toasts expire under steady input
        app.update(Event::Tick);

        app.poll_session();
    }
    Ok(())
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Leave the terminal usable if something panics mid-frame
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        hook(info);
    }));

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
