//! Newsdesk Dashboard
//!
//! Admin and author dashboard core for the Newsdesk CMS:
//! - Entity services, one async call per REST operation
//! - Stores that keep the shared query cache in step with confirmed mutations
//! - Memoized client-side filters
//! - Typed create/edit form state with required-field checks and minimal diffs
//! - Confirm-dialog actions and user notifications

pub mod actions;
pub mod filter;
pub mod forms;
pub mod notify;
pub mod services;
pub mod stores;

#[cfg(test)]
pub(crate) mod fixtures;

use newsdesk_common::{api::ApiClient, errors::Result, AppConfig, QueryCache};
use std::sync::Arc;
use stores::{ArticleStore, AuthorStore, StoryStore, TagStore};

/// Every store wired to one client and one cache
#[derive(Clone)]
pub struct Dashboard {
    pub cache: Arc<QueryCache>,
    pub authors: AuthorStore,
    pub articles: ArticleStore,
    pub stories: StoryStore,
    pub tags: TagStore,
}

impl Dashboard {
    /// Build against the configured backend
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = ApiClient::from_config(&config.api)?;
        let cache = Arc::new(QueryCache::new(&config.cache));
        Ok(Self::new(client, cache, config))
    }

    pub fn new(client: ApiClient, cache: Arc<QueryCache>, config: &AppConfig) -> Self {
        tracing::info!(
            base_url = %config.api.base_url,
            stale_secs = config.cache.stale_secs,
            "Dashboard initialized"
        );
        Self {
            authors: AuthorStore::new(client.clone(), cache.clone(), &config.api),
            articles: ArticleStore::new(client.clone(), cache.clone(), &config.api),
            stories: StoryStore::new(client.clone(), cache.clone()),
            tags: TagStore::new(client, cache.clone()),
            cache,
        }
    }
}
