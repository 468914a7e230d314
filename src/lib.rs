//! API Portal - static API documentation portal
//!
//! This library provides the spec indexer that turns a directory of OpenAPI
//! YAML files into the sidebar index, and the documentation shell that builds
//! navigation from that index and hands specs to Swagger UI.

pub mod config;
pub mod error;
pub mod indexer;
pub mod routes;
pub mod shell;

use std::time::Instant;

pub use crate::config::Config;
pub use crate::indexer::SpecMetadata;
pub use crate::shell::DocsShell;

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        Self {
            config,
            start_time: Instant::now(),
        }
    }
}
