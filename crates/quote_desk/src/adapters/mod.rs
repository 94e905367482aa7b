// Rust guideline compliant 2026-02-23

//! Adapters (secondary ports) for the desk binaries.
//!
//! Each sub-module implements one hexagonal port trait defined in the
//! `domain` crate. The SQLite store is loaded by `quote_desk_sqlite` only.

pub mod in_memory_store;
pub mod log_notifier;
pub mod system_clock;
