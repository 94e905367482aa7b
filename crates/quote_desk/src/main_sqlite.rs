// Rust guideline compliant 2026-02-23

//! Quote desk entry point -- `SQLite` storage.
//!
//! Identical to the `quote_desk` binary except that rate-limit state and
//! submission history live in a `SQLite` database, so they survive restarts.
//! Only this entry point and the adapter differ; the gate is untouched.
//!
//! # Usage
//!
//! ```text
//! $ RUST_LOG=info QUOTE_DESK_DB=sqlite:desk.db cargo run --bin quote_desk_sqlite < requests.jsonl
//! ```
//!
//! Without `QUOTE_DESK_DB` the file `quote_desk.db` is created in the current
//! working directory on first run.

mod adapters;

// Load sqlite_store directly so it only enters this binary's module tree,
// avoiding dead_code warnings in the `quote_desk` binary.
#[path = "adapters/sqlite_store.rs"]
mod sqlite_store;

mod desk;

use adapters::log_notifier::LogNotifier;
use adapters::system_clock::SystemClock;
use anyhow::Context as _;
use gate::{Gate, GateConfig};
use sqlite_store::SqliteStore;

/// Environment variable naming the database URL.
const DB_URL_VAR: &str = "QUOTE_DESK_DB";
const DEFAULT_DB_URL: &str = "sqlite:quote_desk.db";

/// Submissions allowed per identity per hour.
const MAX_SUBMISSIONS: usize = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries responses only.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let db_url = std::env::var(DB_URL_VAR).unwrap_or_else(|_| DEFAULT_DB_URL.to_owned());
    let store = SqliteStore::new(&db_url)
        .await
        .with_context(|| format!("failed to open SQLite store at {db_url}"))?;
    tracing::info!(db_url = %db_url, "main.store.opened");

    let config = GateConfig::builder(MAX_SUBMISSIONS)
        .build()
        .context("failed to build gate config")?;
    let gate = Gate::new(config);
    let notifier = LogNotifier::new();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("main.shutdown: ctrl_c received");
        }
        result = desk::serve(&gate, &store, &notifier, &SystemClock) => {
            result?;
        }
    }

    Ok(())
}
