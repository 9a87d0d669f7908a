use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use recall::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    history::History,
    runtime::{AppEvent, CrosstermEventSource, Runner},
    session::SessionConfig,
    vocab::{FileVocabularyStore, Vocabulary, VocabularyStore},
};
use std::{
    error::Error,
    fs::{self, File, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
};

/// timed vocabulary flashcards in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Timed vocabulary recall: each word is shown for 10 seconds, then its translation for 5 seconds, before moving on. Settings given on the command line are remembered for the next session."
)]
pub struct Cli {
    /// language the words are shown in
    #[clap(short = 's', long = "source")]
    source_language: Option<String>,

    /// language to recall the translation in
    #[clap(short = 't', long = "target")]
    target_language: Option<String>,

    /// number of words in a session
    #[clap(short = 'w', long = "words")]
    word_count: Option<usize>,

    /// category to draw words from (repeatable, "all" for every category)
    #[clap(short = 'c', long = "category")]
    categories: Vec<String>,

    /// vocabulary file to use instead of the default location
    #[clap(long)]
    vocabulary: Option<PathBuf>,

    /// list languages and categories, then exit
    #[clap(long)]
    list: bool,

    /// append translation groups from a `|`-separated CSV file, then exit
    #[clap(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// write all translation groups as `|`-separated CSV, then exit
    #[clap(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// replace the saved vocabulary with the builtin sample, then exit
    #[clap(long)]
    reset: bool,
}

impl Cli {
    fn edits_vocabulary(&self) -> bool {
        self.reset || self.import.is_some() || self.export.is_some()
    }

    /// Overlay command line flags onto persisted settings
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(source) = &self.source_language {
            cfg.source_language = source.clone();
        }
        if let Some(target) = &self.target_language {
            cfg.target_language = target.clone();
        }
        if let Some(count) = self.word_count {
            cfg.word_count = count;
        }
        if !self.categories.is_empty() {
            cfg.categories = self.categories.clone();
        }
        cfg
    }
}

fn init_logging() {
    let path = AppDirs::log_path();
    let file = path
        .parent()
        .and_then(|dir| fs::create_dir_all(dir).ok())
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path).ok());

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match file {
        Some(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would draw over the alternate screen
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn vocabulary_store(cli: &Cli) -> FileVocabularyStore {
    let path = cli
        .vocabulary
        .clone()
        .unwrap_or_else(AppDirs::vocabulary_path);
    FileVocabularyStore::with_path(path)
}

fn load_vocabulary(store: &FileVocabularyStore) -> Vocabulary {
    match store.load() {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            log::error!(
                "Could not load vocabulary {}: {}; using builtin sample",
                store.path().display(),
                e
            );
            Vocabulary::builtin()
        }
    }
}

/// Reset, import and export run in that order against the saved vocabulary.
/// Unlike a session, an unreadable vocabulary is an error here so an import
/// never overwrites it.
fn edit_vocabulary(cli: &Cli, store: &FileVocabularyStore) -> Result<(), Box<dyn Error>> {
    if cli.reset {
        store.save(&Vocabulary::builtin())?;
        println!("vocabulary reset: {}", store.path().display());
    }

    if let Some(path) = &cli.import {
        let mut vocabulary = store.load()?;
        let file = File::open(path)?;
        let added = vocabulary.import_csv(file, Local::now().timestamp_millis())?;
        vocabulary.validate();
        store.save(&vocabulary)?;
        println!("imported {} groups into {}", added, store.path().display());
    }

    if let Some(path) = &cli.export {
        let vocabulary = store.load()?;
        vocabulary.export_csv(File::create(path)?)?;
        println!(
            "exported {} groups to {}",
            vocabulary.groups.len(),
            path.display()
        );
    }

    Ok(())
}

fn print_listing(vocabulary: &Vocabulary) {
    println!("languages:");
    for (lang, count) in vocabulary.word_counts() {
        println!("  {:<6} {:<16} {} words", lang.id, lang.label, count);
    }
    println!("categories:");
    for category in vocabulary.categories() {
        println!("  {:<24} {}", category.id, category.label);
    }
}

/// The session core does not check its configuration; that happens here
fn validate(cfg: &SessionConfig, vocabulary: &Vocabulary) {
    let mut cmd = Cli::command();
    for lang in [&cfg.source_language, &cfg.target_language] {
        if let Err(e) = vocabulary.require_language(lang) {
            cmd.error(ErrorKind::InvalidValue, e).exit();
        }
    }
    if cfg.source_language == cfg.target_language {
        cmd.error(
            ErrorKind::ArgumentConflict,
            "source and target languages must differ",
        )
        .exit();
    }
    if cfg.word_count == 0 {
        cmd.error(ErrorKind::InvalidValue, "number of words must be positive")
            .exit();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let store = vocabulary_store(&cli);
    if cli.edits_vocabulary() {
        return edit_vocabulary(&cli, &store);
    }

    let vocabulary = load_vocabulary(&store);
    if cli.list {
        print_listing(&vocabulary);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let config = cli.apply_to(config_store.load());
    let session_config = SessionConfig::from(&config);
    validate(&session_config, &vocabulary);

    if let Err(e) = config_store.save(&config) {
        log::warn!("Failed to save settings: {}", e);
    }

    let history = History::with_path(AppDirs::history_path());
    let mut app = App::new(session_config, vocabulary, Some(history));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // restore the terminal even when the loop fails
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step(app.timer_mut()) {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    break;
                }
            }
            AppEvent::Disconnected => break,
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
