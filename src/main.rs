use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use sheetview::{
    events, load_workbook, logging, ui, Action, App, Catalog, Effect, LoadOptions, Settings,
    Theme, ThemeMode, XlsxSource,
};

#[derive(Parser, Debug)]
#[command(name = "sheetview")]
#[command(about = "Browse the sheets of a spreadsheet file in the terminal")]
struct Args {
    /// Path to the .xlsx file
    file: PathBuf,

    /// Log at debug level; logs are printed after exit
    #[arg(long)]
    debug: bool,

    /// Size columns from the header only (faster on large sheets)
    #[arg(long)]
    performance: bool,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Path to a config file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    settings.apply_cli(args.debug, args.performance, args.theme);

    let logs = logging::init(settings.debug);
    let result = run(&args.file, &settings);
    if let Err(ref e) = result {
        tracing::error!("{e:#}");
    }

    // The terminal is restored by now
    let _ = logs.flush_to(&mut io::stderr());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn run(path: &Path, settings: &Settings) -> Result<()> {
    let mut source = XlsxSource::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let options = LoadOptions {
        performance: settings.performance,
    };
    let workbook = load_workbook(&mut source, &options)?;
    tracing::info!(
        file = %workbook.name,
        sheets = workbook.sheets.len(),
        "Workbook loaded"
    );

    let theme = Theme::from_mode(settings.theme);
    let catalog = Catalog::load()?;
    let app = App::new(workbook, theme, catalog)?;

    run_tui(app)
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
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

    // Run the main loop
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
    let size = terminal.size()?;
    let mut pending = Some(Action::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        if let Some(action) = pending.take() {
            if let Some(Effect::TerminalTooSmall { height, required }) = app.apply(action) {
                bail!(app
                    .catalog
                    .t("error.terminal_too_small", &[&height, &required]));
            }
        }
        if !app.running {
            return Ok(());
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(250))? {
            pending = events::map_event(event);
        }
    }
}
