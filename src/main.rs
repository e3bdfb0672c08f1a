use std::{
    error::Error,
    io::{self, stdin},
    path::Path,
    time::Duration,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use highkey::{
    app::{self, App},
    app_dirs::AppDirs,
    config::{parse_count, ConfigStore, FileConfigStore, Preferences, MAX_WORD_COUNT},
    corpus::{Corpus, DEFAULT_CORPUS},
    logging,
    runtime::{CrosstermEventSource, Runner, TICK_RATE_MS},
    theme::{Font, Theme},
};

/// minimal typing speed test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the words shown, commit each one with space, and get your words-per-minute and accuracy when the last word is in. Tab starts over."
)]
pub struct Cli {
    /// number of words in the test (saved as the new default)
    #[clap(short = 'w', long = "words", value_parser = word_count)]
    number_of_words: Option<usize>,

    /// colour theme: light, dark, nord, dracula, solarized, forest
    #[clap(short = 't', long)]
    theme: Option<Theme>,

    /// text style: Ubuntu, "Fira Code", Merriweather, Lexend
    #[clap(short = 'f', long)]
    font: Option<Font>,
}

fn word_count(raw: &str) -> Result<usize, String> {
    parse_count(raw)
        .ok_or_else(|| format!("{raw} is not a whole number between 1 and {MAX_WORD_COUNT}"))
}

/// Logging is optional: report the failure and run without it.
fn start_logging(log_dir: &Path) -> Option<WorkerGuard> {
    match logging::init(log_dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!(
                "warning: logging disabled, cannot use {}: {err}",
                log_dir.display()
            );
            None
        }
    }
}

impl Cli {
    /// Flags win over stored values. Returns true if anything was overridden.
    fn apply(&self, prefs: &mut Preferences) -> bool {
        let before = *prefs;
        if let Some(count) = self.number_of_words {
            prefs.count = count;
        }
        if let Some(theme) = self.theme {
            prefs.theme = theme;
        }
        if let Some(font) = self.font {
            prefs.font = font;
        }
        before != *prefs
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = start_logging(&AppDirs::log_dir());

    let store = FileConfigStore::new();
    let mut prefs = store.load();
    if cli.apply(&mut prefs) {
        store.save(&prefs)?;
    }
    info!(?prefs, path = %store.path().display(), "starting");

    let corpus = Corpus::load(DEFAULT_CORPUS)?;
    let mut app = App::new(prefs, Box::new(store), Box::new(corpus));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = app::run(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}
