mod app;
mod event;
mod ui;

/// Version injected at compile time via CMEDIT_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("CMEDIT_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use cmedit::cms::ContentManagerClient;
use cmedit::config::Config;
use cmedit::editor::CtypePolicy;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Terminal editor for content manager resources
#[derive(Parser, Debug)]
#[command(name = "cmedit", version, about, long_about = None)]
struct Args {
    /// Content manager server, e.g. http://localhost:8080
    #[arg(short, long)]
    base_url: Option<String>,

    /// Resource path to load on start, e.g. /index.html
    #[arg(short, long)]
    path: Option<String>,

    /// Editor location to derive the path from, e.g. /content_manager/index.html
    #[arg(short, long)]
    location: Option<String>,

    /// What to send for an empty content type on save
    #[arg(long, value_enum)]
    ctype_policy: Option<CtypePolicy>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cmedit started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cmedit").join("cmedit.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cmedit").join("cmedit.log");
    }
    PathBuf::from("cmedit.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let config = Config::load();
    let base_url = config.effective_base_url(args.base_url.as_deref());
    let ctype_policy = config.effective_ctype_policy(args.ctype_policy);

    // Without a transport there is nothing to edit with
    let client = ContentManagerClient::new(&base_url)
        .with_context(|| format!("Cannot use content manager at {}", base_url))?;
    tracing::info!("Using content manager at {}, ctype policy {:?}", base_url, ctype_policy);

    // An explicit location wins over the remembered path
    let initial_path = match (&args.path, &args.location) {
        (Some(path), _) => Some(path.clone()),
        (None, None) => config.last_path.clone(),
        (None, Some(_)) => None,
    };
    let load_on_start = args.path.is_some() || args.location.is_some();

    let mut app = App::new(client, config, ctype_policy, args.location.clone());
    if let Some(path) = initial_path {
        app.form.path = path;
    }
    if load_on_start {
        app.load();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_app(&mut terminal, &mut app);
    cleanup_terminal(&mut terminal)?;

    // A save issued right before quitting must still reach the server
    let pending = app.pending_saves();
    if pending > 0 {
        tracing::info!("Waiting for {} pending save(s)", pending);
    }
    app.finish_saves().await;

    if let Err(err) = run_result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::handle_events(app)? {
            return Ok(());
        }

        // Completions from spawned loads/saves, last one applied wins
        app.drain_events();
    }
}
