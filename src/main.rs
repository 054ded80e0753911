mod app;
mod domain;
mod error;
mod input;
mod notifications;
mod persistence;
mod report;
mod store;
mod ticker;
mod toast;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::{Duration, Local};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{LogEntry, TaskId};
use notifications::DesktopNotifier;
use persistence::{
    atomic_write, document_file, ensure_data_dir, init_document, load_settings, log_file,
    resolve_data_dir, save_settings, settings_file, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use store::Store;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
const LOG_FILTER_ENV: &str = "TIMEBOX_LOG";

/// Largest manual log entry: one week
const MAX_LOG_MINUTES: i64 = 7 * 24 * 60;

#[derive(Parser)]
#[command(name = "timebox")]
#[command(about = "Terminal time tracker with daily, weekly and long-term budgets")]
#[command(long_about = None)]
struct Cli {
    /// Data directory. Defaults to $APP_DATA, then the platform data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory with an empty document and default settings
    Init,
    /// Print a summary of budgets and spent time
    Status {
        /// Write the summary to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Log minutes against a task
    Log {
        task_id: TaskId,
        /// Whole minutes, 1 to 10080
        #[arg(value_parser = clap::value_parser!(i64).range(1..=MAX_LOG_MINUTES))]
        minutes: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir)?;
    ensure_data_dir(&data_dir)?;
    init_tracing(&data_dir)?;

    match cli.command {
        Some(Commands::Init) => {
            let path = init_document(&data_dir)?;
            let settings_path = settings_file(&data_dir);
            if !settings_path.exists() {
                save_settings(&settings_path, &Settings::default())?;
            }
            println!("Initialized timebox document: {}", path.display());
            println!();
            println!("Run 'timebox' to start tracking time.");
            Ok(())
        }
        Some(Commands::Status { output }) => {
            let settings = load_settings(settings_file(&data_dir))?;
            let store = Store::new(document_file(&data_dir), settings.window_policy());
            let context = store.get_context()?;
            let summary = report::generate_summary(&context, Local::now());

            match output {
                Some(path) => {
                    atomic_write(&path, &summary)?;
                    println!("Summary written: {}", path.display());
                }
                None => print!("{}", summary),
            }
            Ok(())
        }
        Some(Commands::Log { task_id, minutes }) => {
            let settings = load_settings(settings_file(&data_dir))?;
            let mut store = Store::new(document_file(&data_dir), settings.window_policy());
            store
                .push_log(LogEntry::new(task_id, Duration::minutes(minutes), Local::now()))
                .with_context(|| format!("Could not log {} minutes on task {}", minutes, task_id))?;
            println!("Logged {}m on task {}", minutes, task_id);
            Ok(())
        }
        None => run_tui(&data_dir),
    }
}

/// Send tracing output to the log file; the terminal belongs to the TUI
fn init_tracing(data_dir: &Path) -> Result<()> {
    let path = log_file(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = std::env::var(LOG_FILTER_ENV)
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn run_tui(data_dir: &Path) -> Result<()> {
    let settings = load_settings(settings_file(data_dir))?;
    let store = Store::new(document_file(data_dir), settings.window_policy());
    tracing::info!(path = %store.path().display(), "starting");

    let mut app = AppState::new(store, settings, Box::new(DesktopNotifier));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // A running session is logged rather than lost
    app.stop_on_exit();

    if let Err(err) = result {
        tracing::error!(error = %err, "terminal loop failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick();
        app.check_budget_reached();
        app.check_day_rollover();
        app.process_store_events();
    }
}
