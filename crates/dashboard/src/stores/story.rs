use crate::services::StoryService;
use newsdesk_common::{
    api::ApiClient,
    cache::{QueryCache, QueryKey},
    errors::Result,
    models::WebStory,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct StoryStore {
    service: StoryService,
    cache: Arc<QueryCache>,
}

impl StoryStore {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self {
            service: StoryService::new(client),
            cache,
        }
    }

    pub async fn all(&self) -> Result<Vec<WebStory>> {
        self.cache
            .get_or_load(&QueryKey::AllStories, || self.service.list_all())
            .await
    }

    pub async fn by_author(&self, author_id: i64) -> Result<Vec<WebStory>> {
        self.cache
            .get_or_load(&QueryKey::StoriesByAuthor(author_id), || {
                self.service.list_by_author(author_id)
            })
            .await
    }
}
