use crate::services::TagService;
use newsdesk_common::{
    api::ApiClient,
    cache::{QueryCache, QueryKey},
};
use std::sync::Arc;
use tracing::warn;

/// Shown when the backend has no trending tags to offer
pub const FALLBACK_TAGS: &[&str] = &[
    "Uttarakhand",
    "Char Dham Yatra",
    "Hill Farming",
    "Kumaoni Culture",
    "Garhwali Folk",
    "Himalayan Wildlife",
    "Monsoon",
    "Eco Tourism",
];

#[derive(Clone)]
pub struct TagStore {
    service: TagService,
    cache: Arc<QueryCache>,
}

impl TagStore {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self {
            service: TagService::new(client),
            cache,
        }
    }

    /// Trending tags. Never fails: an error or an empty answer yields the
    /// fallback list, which is not cached.
    pub async fn trending(&self) -> Vec<String> {
        let key = QueryKey::TrendingTags;
        match self
            .cache
            .get_or_load(&key, || self.service.trending())
            .await
        {
            Ok(tags) if !tags.is_empty() => tags,
            Ok(_) => {
                self.cache.remove(&key).await;
                fallback()
            }
            Err(e) => {
                warn!(error = %e, "Trending tags unavailable, using fallback");
                fallback()
            }
        }
    }
}

fn fallback() -> Vec<String> {
    FALLBACK_TAGS.iter().map(|tag| tag.to_string()).collect()
}
