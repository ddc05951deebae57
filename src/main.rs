use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Instant,
};
use tracing::{info, warn};

use tapwise::{
    app::{App, KeyAction},
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TapEvent, TapEventSource, Ticker},
};

/// terminal rhythm trainer: tap along with a metronome and see whether you rush or drag
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Tap along with a metronome. Every tap is scored against the target interval, tempo drift is called out as it happens, and the session ends with a consistency, tendency and stability summary."
)]
pub struct Cli {
    /// target tempo in beats per minute
    #[clap(short = 'b', long, value_parser = clap::value_parser!(u32).range(40..=240))]
    bpm: Option<u32>,

    /// session length in seconds
    #[clap(short = 'd', long = "duration", value_parser = clap::value_parser!(u64).range(5..=600))]
    duration_secs: Option<u64>,

    /// silence the terminal bell on each beat
    #[clap(long)]
    no_click: bool,

    /// read and write settings from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Stored settings with any flags given on the command line applied on top
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(bpm) = self.bpm {
            config.bpm = bpm;
        }
        if let Some(duration_secs) = self.duration_secs {
            config.duration_secs = duration_secs;
        }
        if self.no_click {
            config.click = false;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // the UI owns the terminal; without a log file we simply run silent
    let _ = logging::init_file_logging();

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = cli.merge_into(store.load());
    let mut app = App::new(config, Instant::now())?;
    info!(bpm = app.config.bpm, duration_secs = app.config.duration_secs, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = store.save(&app.config) {
        warn!(error = %err, "failed to save config");
    }

    result
}

fn start_tui<B, E, T>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend + Write,
    E: TapEventSource,
    T: Ticker,
{
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            TapEvent::Tick => {
                let tick = app.on_tick(Instant::now());
                if tick.beat.is_some() && app.config.click {
                    execute!(terminal.backend_mut(), Print("\x07"))?;
                }
            }
            TapEvent::Resize => {}
            TapEvent::Key(key) => {
                if app.on_key(key, Instant::now()) == KeyAction::Quit {
                    return Ok(());
                }
            }
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }
}
