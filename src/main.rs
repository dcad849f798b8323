mod advisor;
mod config;
mod db;
mod export;
mod models;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    init_logger(&config.log_path())?;

    let db_path = config.db_path();
    let db = db::Database::open(&db_path)?;
    let mut ledger = store::Ledger::open(Box::new(db));
    let advisor = Arc::new(advisor::GeminiAdvisor::new(&config.advisor));

    match args.len() {
        1 => run::as_tui(&mut ledger, advisor),
        2.. => run::as_cli(&args, &mut ledger, advisor.as_ref()),
        _ => {
            eprintln!("Usage: saldofixo [command]");
            Ok(())
        }
    }
}

/// Logs go to a file: the TUI owns the terminal.
fn init_logger(path: &Path) -> Result<()> {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME"))),
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
