//! Libris book catalog and lending store
//!
//! Keeps a small library's books and who has borrowed them in a local SQLite
//! file, and serves an admin surface and a patron surface over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Open the database, apply migrations and build the services
    pub async fn connect(config: AppConfig) -> AppResult<Self> {
        let repository = repository::Repository::connect(&config.database).await?;
        let services = services::Services::new(repository, &config.events);
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
