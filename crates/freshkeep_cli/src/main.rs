//! CLI smoke and diagnostics entry point.
//!
//! # Responsibility
//! - Verify `freshkeep_core` linkage with deterministic output.
//! - Print a read-only pantry report for an existing store file.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use freshkeep_core::db::open_db_read_only;
use freshkeep_core::{PantryService, ReminderOutbox, SqliteKeyValueStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "freshkeep_cli")]
#[command(about = "FreshKeep core smoke check and pantry report")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print food items with freshness, the grocery list, and a summary.
    Report {
        /// Existing store database file. Never created or migrated.
        #[arg(value_name = "DB_PATH")]
        db_path: PathBuf,
        /// Classification date (`YYYY-MM-DD`); defaults to today.
        #[arg(value_name = "DATE", value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("freshkeep_core ping={}", freshkeep_core::ping());
    println!("freshkeep_core version={}", freshkeep_core::core_version());

    match cli.command {
        None => ExitCode::SUCCESS,
        Some(Command::Report { db_path, date }) => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let mut stdout = std::io::stdout().lock();
            match run_report(&db_path, today, &mut stdout) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{raw}` (expected YYYY-MM-DD): {err}"))
}

fn run_report(db_path: &Path, today: NaiveDate, out: &mut impl Write) -> Result<(), String> {
    if !db_path.is_file() {
        return Err(format!("store not found: `{}`", db_path.display()));
    }

    let conn = open_db_read_only(db_path).map_err(|err| format!("failed to open store: {err}"))?;
    let store = SqliteKeyValueStore::try_new(&conn).map_err(|err| err.to_string())?;
    // Reminders are never delivered from the CLI; the outbox is discarded.
    let service = PantryService::load(store, ReminderOutbox::new());

    write_report(&service, today, out).map_err(|err| format!("failed to write report: {err}"))
}

fn write_report(
    service: &PantryService<SqliteKeyValueStore<'_>, ReminderOutbox>,
    today: NaiveDate,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "today={today}")?;
    for view in service.food_item_views(today) {
        writeln!(
            out,
            "food id={} expires={} days_until={} freshness={} name={}",
            view.item.id,
            view.item.expiration_date,
            view.days_until,
            view.freshness.label(),
            view.item.name
        )?;
    }
    for (index, name) in service.grocery_items().iter().enumerate() {
        writeln!(out, "grocery index={index} name={name}")?;
    }
    let summary = service.freshness_summary(today);
    writeln!(
        out,
        "summary expired={} expiring_soon={} fresh={} groceries={}",
        summary.expired,
        summary.expiring_soon,
        summary.fresh,
        service.grocery_items().len()
    )
}
