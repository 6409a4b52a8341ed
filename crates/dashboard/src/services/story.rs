//! Web story endpoints

use newsdesk_common::{api::ApiClient, errors::Result, models::WebStory};

#[derive(Clone)]
pub struct StoryService {
    client: ApiClient,
}

impl StoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_all(&self) -> Result<Vec<WebStory>> {
        self.client.get("/web-stories", &[]).await
    }

    pub async fn list_by_author(&self, author_id: i64) -> Result<Vec<WebStory>> {
        self.client
            .get(&format!("/web-stories/author/{}", author_id), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_common::MockTransport;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_all_decodes_stories() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::GET,
            "/web-stories",
            json!([
                { "id": 1, "title": "Test Web Story 1", "cover_image": "/images/story1.jpg",
                  "created_at": "2025-03-01T10:00:00Z" },
                { "id": 2, "title": "Test Web Story 2", "cover_image": "/images/story2.jpg",
                  "created_at": "2025-03-01T11:00:00Z" }
            ]),
        );

        let stories = StoryService::new(ApiClient::new(mock.clone()))
            .list_all()
            .await
            .unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[1].cover_image, "/images/story2.jpg");
        assert!(stories[0].status.is_none());
    }
}
