// Rust guideline compliant 2026-02-23

//! Quote desk entry point.
//!
//! Wires the submission gate to the in-memory store, the log notifier and the
//! system clock, then answers JSON-lines requests on stdin until EOF or CTRL+C.
//!
//! # Usage
//!
//! ```text
//! $ echo '{"ramSpec":{"type":"DDR4","capacity":16,"speed":3200,"brand":"Corsair","condition":"new","quantity":1}}' \
//!     | RUST_LOG=info cargo run --bin quote_desk
//! ```
//!
//! Add a `"contact"` object (and optionally `"identity"`) to submit instead of
//! previewing. State is lost on exit; see `quote_desk_sqlite` for persistence.

mod adapters;
mod desk;

use adapters::in_memory_store::InMemoryStore;
use adapters::log_notifier::LogNotifier;
use adapters::system_clock::SystemClock;
use anyhow::Context as _;
use gate::{Gate, GateConfig};

/// Submissions allowed per identity per hour.
const MAX_SUBMISSIONS: usize = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries responses only.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = GateConfig::builder(MAX_SUBMISSIONS)
        .build()
        .context("failed to build gate config")?;
    let gate = Gate::new(config);
    let store = InMemoryStore::new();
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
