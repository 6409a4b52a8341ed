//! Tag endpoints

use newsdesk_common::{api::ApiClient, errors::Result};

#[derive(Clone)]
pub struct TagService {
    client: ApiClient,
}

impl TagService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn trending(&self) -> Result<Vec<String>> {
        self.client.get("/tags/trending", &[]).await
    }
}
