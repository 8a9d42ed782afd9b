//! Youth Registry Library
//!
//! Registry of youth organizations: the HTTP endpoint that stores the
//! records and the admin surface that lists and edits them.

pub mod admin;
pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use db::DbPool;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Database connection pool
    pub db: DbPool,
}
