//! ContentDesk terminal front end.
//!
//! # Responsibility
//! - Parse startup flags, initialize logging, and open the slot store.
//! - Hand stdin/stdout to the controller session.

mod command;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use contentdesk_core::{
    default_log_level, init_logging, ContentStore, Controller, LoadOutcome, Renderer,
    SqliteSlotRepository, TimestampFormat, DEFAULT_SLOT_KEY,
};
use log::{info, warn};
use std::io;
use std::path::PathBuf;
use terminal::{run_session, Terminal};

/// Manage titled content entries stored in a local slot file.
#[derive(Debug, Parser)]
#[command(name = "contentdesk", version)]
struct Args {
    /// SQLite file holding the durable slot.
    #[arg(long, default_value = "contentdesk.sqlite3")]
    db_path: PathBuf,
    /// Slot key the collection is stored under.
    #[arg(long, default_value = DEFAULT_SLOT_KEY)]
    slot_key: String,
    /// Absolute log directory. Defaults to `<tmp>/contentdesk-logs`.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Locale for timestamps, e.g. `en_US` or `de_DE`.
    #[arg(long, default_value = "en_US")]
    locale: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("contentdesk-logs"));
    let log_level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(log_level, &log_dir.to_string_lossy()).context("failed to initialize logging")?;

    let format = TimestampFormat::for_locale_name(&args.locale)?;
    let repo = SqliteSlotRepository::open(&args.db_path)
        .with_context(|| format!("failed to open `{}`", args.db_path.display()))?;
    let store = ContentStore::new(repo, args.slot_key.as_str());
    let (mut controller, outcome) = Controller::init(store, Renderer::new(format))?;

    match &outcome {
        LoadOutcome::Recovered { reason } => {
            warn!("event=startup module=cli status=recovered");
            eprintln!("stored content was unreadable and has been reset ({reason})");
        }
        LoadOutcome::Loaded {
            dropped_duplicates,
            dropped_invalid,
            ..
        } => {
            if *dropped_duplicates > 0 {
                eprintln!("skipped {dropped_duplicates} stored entries with duplicate ids");
            }
            if *dropped_invalid > 0 {
                eprintln!("skipped {dropped_invalid} stored entries that could not be read");
            }
        }
        LoadOutcome::Empty => {}
    }
    info!(
        "event=startup module=cli status=ok db_path={} slot_key={}",
        args.db_path.display(),
        args.slot_key
    );

    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());
    run_session(&mut controller, &mut terminal)?;

    info!("event=shutdown module=cli status=ok");
    Ok(())
}
