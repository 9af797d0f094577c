#![forbid(unsafe_code)]

mod app;
mod config;
mod constants;
mod layout;
mod modes;
mod persistence;
mod screen;
mod selection;
mod serializer;
mod source;
mod types;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info, warn, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use app::{SaveOutcome, Session};
use config::{Settings, SettingsFile};
use persistence::FilePersistence;
use screen::TerminalScreen;
use source::{DisplaySource, FixtureSource, HyprctlSource, JsonFileSource};

/// Interactive editor for Hyprland monitor layouts
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Write the configuration here instead of the configured output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hyprland instance signature to query
    #[arg(short, long)]
    instance: Option<String>,

    /// Edit the built-in sample arrangement instead of querying Hyprland
    #[arg(long, conflicts_with = "from_file")]
    mock: bool,

    /// Read monitors from saved `hyprctl monitors all -j` output
    #[arg(long, value_name = "PATH")]
    from_file: Option<PathBuf>,

    /// Print the configuration on exit without writing it
    #[arg(long)]
    print_only: bool,

    /// Persist the effective settings to the settings file and continue
    #[arg(long)]
    save_settings: bool,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

/// Log to a file in the cache dir; the terminal belongs to the editor
fn init_logging(level: TraceLevel) -> Result<()> {
    let builder = FmtSubscriber::builder().with_max_level(level).with_ansi(false);

    let log_file = dirs::cache_dir().map(|dir| dir.join(constants::config::APP_DIR)).and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        File::create(dir.join(constants::config::LOG_FILENAME)).ok()
    });

    match log_file {
        Some(file) => tracing::subscriber::set_global_default(builder.with_writer(Mutex::new(file)).finish())?,
        None => tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())?,
    }
    Ok(())
}

fn pick_source(cli: &Cli, settings: &Settings) -> Box<dyn DisplaySource> {
    if cli.mock {
        return Box::new(FixtureSource);
    }
    if let Some(path) = &cli.from_file {
        return Box::new(JsonFileSource { path: path.clone() });
    }

    let hyprctl = HyprctlSource::new(settings.instance.clone());
    if !hyprctl.has_instance() {
        warn!("No running Hyprland instance found; pass --mock to try the editor with sample monitors");
    }
    Box::new(hyprctl)
}

/// Command-line flags win over everything else
fn apply_cli(settings: &mut Settings, cli: &Cli) {
    if let Some(output) = &cli.output {
        settings.output_path = Some(output.clone());
    }
    if let Some(instance) = &cli.instance {
        settings.instance = Some(instance.clone());
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = Settings::config_path();
    let settings_file = SettingsFile::read(&settings_path);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env::var(constants::env::LOG_LEVEL).ok().filter(|level| !level.is_empty()))
        .or_else(|| settings_file.log_level().map(str::to_string))
        .unwrap_or_else(|| "info".to_string());
    init_logging(parse_level(&log_level))?;

    let mut file_settings = settings_file.into_settings(&settings_path);
    file_settings.validate_and_clamp();

    if cli.save_settings {
        let mut persisted = file_settings.clone();
        apply_cli(&mut persisted, &cli);
        persisted.save_to(&settings_path)?;
        info!(path = %settings_path.display(), "Saved settings");
    }

    let mut settings = file_settings;
    settings.apply_env_overrides();
    apply_cli(&mut settings, &cli);
    info!(settings = ?settings, "Starting hypr-monitor-tui");

    let source = pick_source(&cli, &settings);
    let store = source::load_store(source.as_ref());
    if store.is_empty() {
        eprintln!(
            "No monitors reported by {}; nothing to edit (use --mock for a sample arrangement).",
            source.describe()
        );
        return Ok(());
    }

    let mut session = Session::new(store, settings.canvas());
    {
        let mut screen = TerminalScreen::enter()?;
        let result = session.run(&mut screen);
        if let Err(e) = screen.restore() {
            error!(error = ?e, "Failed to restore terminal");
        }
        if let Err(e) = result {
            error!(error = ?e, "Editing session ended with an error, saving the arrangement as edited");
            eprintln!("Editing session failed: {e:#}");
        }
    }

    println!("Monitor configuration:");
    print!("{}", session.config_text());

    let output_path = settings.output_path();
    let target = (!cli.print_only).then_some(output_path.as_path());
    match session.save(&mut FilePersistence, target) {
        SaveOutcome::Written => println!("\nSaved to {}", output_path.display()),
        SaveOutcome::Skipped => println!("\nNot saved (--print-only)"),
        SaveOutcome::Failed(e) => eprintln!("\nCould not save {}: {e:#}", output_path.display()),
    }
    Ok(())
}
