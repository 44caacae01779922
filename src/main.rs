use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pingwatch::source::{DataSource, FileSource, HttpSource, PingClient};
use pingwatch::{events, ui, App, PingData, Settings, TimeWindow};

/// How long to wait for input before redrawing.
const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "pingwatch")]
#[command(about = "Terminal dashboard for home network ping latency and downtime")]
struct Args {
    /// Sample API endpoint
    #[arg(short, long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Replay samples from a JSON file instead of polling the API
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Initial time window (minute, ten-minutes, hour, day, week, month)
    #[arg(short, long)]
    window: Option<String>,

    /// Poll interval (e.g., "10s", "30s")
    #[arg(short, long)]
    interval: Option<String>,

    /// Request only a page size, without the timeframe cutoff
    #[arg(long)]
    legacy: bool,

    /// Config file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the dashboard)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch once, write stats and chart points to a JSON file and exit
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(ref endpoint) = args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(ref window) = args.window {
        settings.window = window.parse::<TimeWindow>()?;
    }
    if let Some(ref interval) = args.interval {
        settings.poll_interval = interval.clone();
    }
    if args.legacy {
        settings.legacy_query = true;
    }
    settings.validate()?;

    init_logging(args.log_file.as_deref(), args.export.is_some())?;

    // The poller runs on this runtime; entering it lets sources spawn tasks
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_once(&rt, &settings, args.file.as_deref(), export_path);
    }

    let source: Box<dyn DataSource> = match args.file {
        Some(ref path) => {
            let mut source = FileSource::new(path);
            source.set_query(settings.initial_query());
            Box::new(source)
        }
        None => {
            let client = build_client(&settings)?;
            let interval = settings.poll_interval()?;
            Box::new(HttpSource::spawn(client, settings.initial_query(), interval))
        }
    };

    run_tui(source, settings)
}

fn build_client(settings: &Settings) -> Result<PingClient> {
    Ok(PingClient::builder()
        .endpoint(settings.endpoint.clone())
        .timeout(settings.request_timeout()?)
        .build()?)
}

/// Install the tracing subscriber.
///
/// Interactive runs log only to a file, if one is given. Export runs may
/// also log to stderr.
fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pingwatch=info"));

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if to_stderr {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    }
    Ok(())
}

/// Fetch a single sample set and write the export document.
fn export_once(
    rt: &tokio::runtime::Runtime,
    settings: &Settings,
    file: Option<&Path>,
    export_path: &Path,
) -> Result<()> {
    let query = settings.initial_query();

    let samples = match file {
        Some(path) => {
            let mut source = FileSource::new(path);
            source.set_query(query);
            match source.poll() {
                Some(samples) => samples,
                None => anyhow::bail!(
                    "{}",
                    source.error().unwrap_or("No samples read").to_string()
                ),
            }
        }
        None => {
            let client = build_client(settings)?;
            rt.block_on(client.fetch_now(&query))?
        }
    };

    let data = PingData::from_samples(samples, settings.gridline_ms);
    let json = serde_json::to_string_pretty(&data.to_export_json(settings.window))?;
    std::fs::write(export_path, json)?;

    info!("Exported {} samples", data.len());
    println!("Exported {} samples to: {}", data.len(), export_path.display());
    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, settings);
    info!("Watching {}", app.source_description());

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Non-blocking: picks up whatever the source delivered since last frame
        app.reload_data();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(TICK)? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Layout is recomputed on the next draw
                }
                _ => {}
            }
        }
    }

    Ok(())
}
