// services/reel-dash/src/main.rs
//
// Terminal dashboard for actor/movie records kept behind a remote HTTP API
//
// Run with: cargo run --bin reel-dash -- --demo
//

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod config;
mod export;
mod mock;
mod pipeline;
mod state;
mod store;
mod ui;

use api::{HttpRecordApi, RecordApi};
use app::{App, Flow};
use crate::config::DashConfig;
use mock::InMemoryRecordApi;
use state::{Connection, DashboardState, LogLevel};
use store::RecordStore;
use svckit::config::ObservabilityConfig;

const DEMO_RECORD_COUNT: usize = 42;

#[derive(Parser, Debug)]
#[command(name = "reel-dash")]
#[command(about = "Terminal dashboard for actor/movie records")]
#[command(version)]
struct Args {
    /// Run against an in-memory record set (no API server required)
    #[arg(long, short)]
    demo: bool,

    /// Config file (YAML); missing file means defaults
    #[arg(short, long, default_value = "config/reel-dash.yaml")]
    config: String,

    /// Record API base URL, overrides the config file
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = config::load_config(&args.config)?;
    if let Some(url) = args.api_url.clone() {
        config.api.base_url = url;
    }

    init_tracing(&config.observability)?;
    info!("Starting reel-dash (demo: {})", args.demo);

    let app = build_app(&args, &config)?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, app).await;
    restore_terminal()?;

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    undo_on_error(
        || {
            stdout().execute(EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
        },
        restore_terminal,
    )
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Runs `step`; when it fails, `undo` runs before the error is returned.
fn undo_on_error<T>(
    step: impl FnOnce() -> Result<T>,
    undo: impl FnOnce() -> Result<()>,
) -> Result<T> {
    step().inspect_err(|_| {
        if let Err(e) = undo() {
            warn!("Failed to restore terminal: {}", e);
        }
    })
}

/// Logs go to a file; the terminal belongs to the dashboard.
fn init_tracing(observability: &ObservabilityConfig) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&observability.log_file)
        .with_context(|| format!("Failed to open log file {}", observability.log_file))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| observability.log_level.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}

fn build_app(args: &Args, config: &DashConfig) -> Result<App> {
    let (api, connection): (Box<dyn RecordApi>, Connection) = if args.demo {
        (Box::new(InMemoryRecordApi::seeded(DEMO_RECORD_COUNT)), Connection::Demo)
    } else {
        (Box::new(HttpRecordApi::new(&config.api)?), Connection::Live)
    };

    let mut state = DashboardState::new(config.view.page_size, connection);
    if args.demo {
        state.add_log(LogLevel::Info, "reel-dash started in DEMO mode");
    } else {
        state.add_log(
            LogLevel::Info,
            &format!("reel-dash started - connecting to {}", config.api.base_url),
        );
    }

    Ok(App::new(
        RecordStore::new(api),
        state,
        PathBuf::from(&config.export.directory),
    ))
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    app.refresh().await;

    loop {
        let view = app.frame();
        terminal.draw(|frame| ui::draw(frame, &app.state, &view, app.endpoint()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key).await == Flow::Quit {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }
    }
}
