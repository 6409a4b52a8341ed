//! Article endpoints, including the public reading surfaces

use newsdesk_common::{
    api::{encoded_path, ApiClient, DeleteAck, Page},
    errors::Result,
    models::{
        Article, ArticleStatus, ArticleStatusChange, ArticleUpdate, ArticleView, Category,
        NewArticle, Region,
    },
};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct ArticleService {
    client: ApiClient,
}

impl ArticleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ========================================================================
    // Authoring and moderation
    // ========================================================================

    pub async fn create(&self, article: &NewArticle) -> Result<Article> {
        article.validate()?;

        let created: Article = self.client.post("/articles", article).await?;
        info!(
            article_id = created.id,
            author_id = created.author_id,
            status = %created.status,
            "Article created"
        );
        Ok(created)
    }

    pub async fn list_all(&self, cursor: u64, limit: u64) -> Result<Vec<Article>> {
        self.client
            .get(
                "/articles/all",
                &[("cursor", cursor.to_string()), ("limit", limit.to_string())],
            )
            .await
    }

    pub async fn list_by_author(&self, author_id: i64) -> Result<Vec<Article>> {
        self.client
            .get(&format!("/articles/author/{}", author_id), &[])
            .await
    }

    /// Article joined with its author's profile
    pub async fn get_view(&self, id: i64) -> Result<ArticleView> {
        self.client.get(&format!("/articles/view/{}", id), &[]).await
    }

    /// Send the changed fields of an article
    pub async fn update(&self, update: &ArticleUpdate) -> Result<Article> {
        update.validate()?;

        let article: Article = self
            .client
            .put(&format!("/articles/{}", update.id), update)
            .await?;
        info!(article_id = article.id, "Article updated");
        Ok(article)
    }

    pub async fn update_status(&self, id: i64, status: ArticleStatus) -> Result<Article> {
        let article: Article = self
            .client
            .patch(&format!("/articles/{}/status", id), &ArticleStatusChange { status })
            .await?;
        info!(article_id = id, status = %status, "Article status changed");
        Ok(article)
    }

    /// Hard delete. The server only acknowledges.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let ack: DeleteAck = self.client.delete(&format!("/articles/{}", id)).await?;
        info!(article_id = id, deleted = ack.deleted, "Article delete acknowledged");
        Ok(ack.deleted)
    }

    // ========================================================================
    // Public reading surfaces (approved articles only)
    // ========================================================================

    pub async fn latest_approved(&self, cursor: Option<i64>, limit: u32) -> Result<Page<Article>> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        self.client.get_page("/articles/approved/latest", &query).await
    }

    pub async fn top_approved(&self, limit: u32) -> Result<Vec<Article>> {
        self.client
            .get("/articles/approved/top", &[("limit", limit.to_string())])
            .await
    }

    pub async fn get_approved(&self, id: i64) -> Result<ArticleView> {
        self.client.get(&format!("/articles/approved/{}", id), &[]).await
    }

    pub async fn approved_by_category(&self, category: Category, limit: u32) -> Result<Vec<Article>> {
        self.client
            .get(
                &format!("/articles/approved/category/{}", category),
                &[("limit", limit.to_string())],
            )
            .await
    }

    pub async fn approved_by_region(&self, region: Region, limit: u32) -> Result<Vec<Article>> {
        self.client
            .get(
                &format!("/articles/approved/region/{}", region),
                &[("limit", limit.to_string())],
            )
            .await
    }

    /// Tags are free text, so the segment is percent-encoded
    pub async fn approved_by_tag(&self, tag: &str, limit: u32) -> Result<Vec<Article>> {
        let path = encoded_path(&["articles", "approved", "tag", tag])?;
        self.client
            .get(&path, &[("limit", limit.to_string())])
            .await
    }

    /// One recent approved article per region
    pub async fn region_set(&self) -> Result<Vec<Article>> {
        self.client.get("/articles/approved/region-set", &[]).await
    }
}
