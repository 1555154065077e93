//! Tablero - A Rust-based project dashboard CLI
//!
//! This library provides the core functionality for tracking projects and
//! their sub-projects against a remote Supabase backend: a thin table-level
//! client, a state-sync store, and JSON export/import for backups.

pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod store;
pub mod utils;

// Re-export core types for easier use
pub use models::{BoardStats, Estado, Prioridad, Project, SubProject};
pub use store::{Backup, ProjectStore, RemoteStore, SupabaseClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
