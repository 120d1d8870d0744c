use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use stationwatch::data::time::{parse_timezone, DEFAULT_LOCALE};
use stationwatch::source::fetch_snapshot;
use stationwatch::{
    apply_unit_conversion, events, ui, App, Dashboard, DataSource, FileSource, HttpSource,
    Settings, Snapshot, UnitSystem, View,
};

#[derive(Parser, Debug)]
#[command(name = "stationwatch")]
#[command(about = "Terminal dashboard for a personal weather station")]
struct Args {
    /// Station endpoint serving the weather snapshot
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Read the snapshot from a local JSON file instead of the endpoint
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file (TOML). Defaults to ./stationwatch.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unit system for display: metric or imperial
    #[arg(long)]
    units: Option<String>,

    /// IANA timezone for displayed times (e.g. "America/New_York")
    #[arg(long)]
    timezone: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Export the dashboard figures to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Where to write logs (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Command-line values take priority over the settings file and environment.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref url) = self.url {
            settings.url = Some(url.clone());
            settings.file = None;
        }
        if let Some(ref file) = self.file {
            settings.file = Some(file.clone());
            settings.url = None;
        }
        if let Some(ref units) = self.units {
            settings.units = Some(units.clone());
        }
        if let Some(ref timezone) = self.timezone {
            settings.timezone = timezone.clone();
        }
        if let Some(refresh) = self.refresh {
            settings.refresh_secs = refresh;
        }
        if let Some(ref log_file) = self.log_file {
            settings.log_file = log_file.clone();
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    args.apply(&mut settings);

    init_logging(&settings.log_file)?;

    let timezone = parse_timezone(&settings.timezone)?;
    let unit_system = UnitSystem::from_param(settings.units.as_deref());
    if settings.locale != DEFAULT_LOCALE {
        tracing::debug!(locale = %settings.locale, "Unsupported locale, using {}", DEFAULT_LOCALE);
    }

    // Fetches run on this runtime while the UI owns the main thread
    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return rt.block_on(export_to_file(&settings, unit_system, timezone, export_path));
    }

    let source = create_source(&settings, rt.handle().clone())?;
    let refresh_interval = Duration::from_secs(settings.refresh_secs.max(1));

    tracing::info!(
        source = source.description(),
        units = %unit_system,
        timezone = %timezone,
        "Starting dashboard"
    );

    run_tui(source, settings, unit_system, timezone, refresh_interval)
}

/// Send logs to a file; stdout belongs to the terminal UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn create_source(settings: &Settings, runtime: Handle) -> Result<Box<dyn DataSource>> {
    if let Some(ref path) = settings.file {
        return Ok(Box::new(FileSource::new(path)));
    }

    let Some(ref url) = settings.url else {
        bail!("No data source configured: pass --url or --file, or set `url` in the settings file");
    };

    Ok(Box::new(HttpSource::new(url, runtime)?))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    settings: Settings,
    unit_system: UnitSystem,
    timezone: Tz,
    refresh_interval: Duration,
) -> Result<()> {
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

    let mut app = App::new(source, unit_system, timezone, settings.station);
    app.set_locale(&settings.locale);
    app.refresh();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

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

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Pick up any snapshot that has arrived since the last frame
        app.reload_data();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let top = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, top, area.width, 5u16.min(area.height));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(12),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Current => ui::current::render(frame, app, chunks[2]),
                View::Charts => ui::charts::render(frame, app, chunks[2]),
                View::Annual => ui::annual::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Fetch one snapshot, write the dashboard figures as JSON, and exit.
async fn export_to_file(
    settings: &Settings,
    unit_system: UnitSystem,
    timezone: Tz,
    export_path: &Path,
) -> Result<()> {
    let snapshot: Snapshot = if let Some(ref path) = settings.file {
        FileSource::load(path).with_context(|| format!("Failed to read {}", path.display()))?
    } else if let Some(ref url) = settings.url {
        let client = reqwest::Client::new();
        fetch_snapshot(&client, url)
            .await
            .with_context(|| format!("Failed to fetch {}", url))?
    } else {
        bail!("No data source configured: pass --url or --file, or set `url` in the settings file");
    };

    let display = apply_unit_conversion(Some(&snapshot), unit_system).unwrap_or_default();
    let dashboard = Dashboard::from_snapshot(&display, unit_system, timezone, &settings.locale);

    let json = serde_json::to_string_pretty(&dashboard)?;
    std::fs::write(export_path, json)?;

    tracing::info!(path = %export_path.display(), "Exported dashboard");
    println!("Exported dashboard to: {}", export_path.display());
    Ok(())
}
