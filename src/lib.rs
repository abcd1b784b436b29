//! oath-speaker - HTTP API for water meter data ingestion and querying
//!
//! This crate provides CSV upload into database tables, status-filtered
//! querying, and a canned-reply chat endpoint with:
//! - Destructive-overwrite table loading (an upload fully replaces the
//!   destination table, schema included)
//! - A closed-set table type guarding every identifier the query path uses
//! - SQLite via sqlx, with the pool owned by startup and closed on shutdown
//! - REST API with multipart upload support

pub mod api;
pub mod config;
pub mod ingest;
pub mod storage;

use config::Config;
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
