//! Business logic services

pub mod catalog;
pub mod events;
pub mod lending;

use crate::{config::EventsConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub lending: lending::LendingService,
    pub events: events::ChangeFeed,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, events_config: &EventsConfig) -> Self {
        let feed = events::ChangeFeed::new(events_config.capacity);
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), feed.clone()),
            lending: lending::LendingService::new(repository.clone(), feed.clone()),
            events: feed,
            repository,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
