use crate::services::ArticleService;
use newsdesk_common::{
    api::{ApiClient, Page},
    cache::{QueryCache, QueryKey},
    config::ApiConfig,
    errors::{AppError, Result},
    models::{Article, ArticleStatus, ArticleUpdate, ArticleView, ImageFile, NewArticle},
};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Stands in for the cover URL while the draft is checked before upload
const PENDING_UPLOAD_URL: &str = "pending://upload";

#[derive(Clone)]
pub struct ArticleStore {
    service: ArticleService,
    client: ApiClient,
    cache: Arc<QueryCache>,
    list_cursor: u64,
    list_limit: u64,
    featured_limit: u32,
}

impl ArticleStore {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>, config: &ApiConfig) -> Self {
        Self {
            service: ArticleService::new(client.clone()),
            client,
            cache,
            list_cursor: config.list_cursor,
            list_limit: config.list_limit,
            featured_limit: config.featured_limit,
        }
    }

    pub fn service(&self) -> &ArticleService {
        &self.service
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every article in every status (admin view)
    pub async fn all(&self) -> Result<Vec<Article>> {
        self.cache
            .get_or_load(&QueryKey::AllArticles, || {
                self.service.list_all(self.list_cursor, self.list_limit)
            })
            .await
    }

    pub async fn by_author(&self, author_id: i64) -> Result<Vec<Article>> {
        self.cache
            .get_or_load(&QueryKey::ArticlesByAuthor(author_id), || {
                self.service.list_by_author(author_id)
            })
            .await
    }

    pub async fn view(&self, id: i64) -> Result<ArticleView> {
        self.cache
            .get_or_load(&QueryKey::Article(id), || self.service.get_view(id))
            .await
    }

    /// Top approved articles, most read first
    pub async fn top(&self) -> Result<Vec<Article>> {
        self.cache
            .get_or_load(&QueryKey::FeaturedArticles, || {
                self.service.top_approved(self.featured_limit)
            })
            .await
    }

    /// Lead article of the home page
    pub async fn featured(&self) -> Result<Option<Article>> {
        Ok(self.top().await?.into_iter().next())
    }

    /// One page of the approved feed. Pages are not cached.
    pub async fn latest(&self, cursor: Option<i64>, limit: u32) -> Result<Page<Article>> {
        self.service.latest_approved(cursor, limit).await
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Upload the cover image, create the article and put it first in the
    /// cached lists it belongs to
    pub async fn create(&self, mut draft: NewArticle, image: &ImageFile) -> Result<Article> {
        // image_url is only known after the upload
        let pending = NewArticle {
            image_url: PENDING_UPLOAD_URL.to_string(),
            ..draft.clone()
        };
        pending.validate()?;

        draft.image_url = self.client.upload_image(image).await?;
        let article = self.service.create(&draft).await?;

        self.cache
            .prepend(&QueryKey::ArticlesByAuthor(article.author_id), &article)
            .await?;
        self.cache.prepend(&QueryKey::AllArticles, &article).await?;
        Ok(article)
    }

    /// Send the changed fields. A new cover is uploaded only when supplied.
    pub async fn update(&self, mut changes: ArticleUpdate, image: Option<&ImageFile>) -> Result<Article> {
        changes.validate()?;

        if let Some(image) = image {
            changes.image_url = Some(self.client.upload_image(image).await?);
        }
        let article = self.service.update(&changes).await?;

        for key in self.cached_lists().await {
            self.cache.replace_by_id(&key, &article).await?;
        }
        self.cache.remove(&QueryKey::Article(article.id)).await;
        Ok(article)
    }

    /// Moderate an article. The featured list depends on status, so it is
    /// dropped rather than patched.
    pub async fn update_status(&self, id: i64, status: ArticleStatus) -> Result<Article> {
        let article = self.service.update_status(id, status).await?;

        self.cache.remove(&QueryKey::FeaturedArticles).await;
        for key in self.cached_lists().await {
            self.cache.replace_by_id(&key, &article).await?;
        }
        self.cache.remove(&QueryKey::Article(id)).await;

        info!(article_id = id, status = %status, "Article status synchronized");
        Ok(article)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.service.delete(id).await? {
            warn!(article_id = id, "Server declined to delete article");
            return Err(AppError::NotFound {
                resource_type: "Article".to_string(),
                id: id.to_string(),
            });
        }

        for key in self.cached_lists().await {
            self.cache.remove_by_id::<Article>(&key, id).await?;
        }
        self.cache.remove(&QueryKey::Article(id)).await;
        Ok(())
    }

    /// Cached keys holding a `Vec<Article>`
    async fn cached_lists(&self) -> Vec<QueryKey> {
        self.cache
            .keys()
            .await
            .into_iter()
            .filter(|key| {
                matches!(
                    key,
                    QueryKey::AllArticles
                        | QueryKey::ArticlesByAuthor(_)
                        | QueryKey::FeaturedArticles
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use newsdesk_common::{
        models::{Category, Region},
        MockTransport,
    };
    use reqwest::Method;
    use serde_json::json;

    struct Harness {
        mock: Arc<MockTransport>,
        cache: Arc<QueryCache>,
        store: ArticleStore,
    }

    async fn seeded() -> Harness {
        let mock = Arc::new(MockTransport::new());
        let cache = Arc::new(QueryCache::default());
        let store = ArticleStore::new(
            ApiClient::new(mock.clone()),
            cache.clone(),
            &ApiConfig::default(),
        );
        let all = vec![
            fixtures::article(10, 1, "Snowfall in Auli"),
            fixtures::article(11, 2, "Tea gardens"),
        ];
        cache.set(&QueryKey::AllArticles, &all).await.unwrap();
        cache
            .set(&QueryKey::ArticlesByAuthor(1), &vec![all[0].clone()])
            .await
            .unwrap();
        Harness { mock, cache, store }
    }

    async fn list(h: &Harness, key: QueryKey) -> Vec<Article> {
        h.cache.get(&key).await.unwrap().unwrap()
    }

    fn draft() -> NewArticle {
        NewArticle {
            title: "Landslide on NH-58".into(),
            content: "Traffic diverted".into(),
            author_id: 1,
            tags: vec!["Monsoon".into()],
            status: ArticleStatus::Pending,
            category: Category::News,
            region: Region::Chamoli,
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_prepends_to_author_and_global_lists() {
        let h = seeded().await;
        h.mock.respond_upload("https://cdn.example.com/nh58.jpg");
        h.mock
            .respond(Method::POST, "/articles", fixtures::article_json(12, 1, "Landslide on NH-58"));

        let image = ImageFile::new("nh58.jpg", "image/jpeg", vec![1]);
        h.store.create(draft(), &image).await.unwrap();

        let sent = h.mock.requests_to(Method::POST, "/articles");
        assert_eq!(
            sent[0].body.as_ref().unwrap()["image_url"],
            "https://cdn.example.com/nh58.jpg"
        );

        let all = list(&h, QueryKey::AllArticles).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, 12);
        let mine = list(&h, QueryKey::ArticlesByAuthor(1)).await;
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, 12);
    }

    #[tokio::test]
    async fn test_unnamed_file_is_still_uploaded() {
        let h = seeded().await;
        h.mock.respond_upload("https://cdn.example.com/pasted.png");
        h.mock
            .respond(Method::POST, "/articles", fixtures::article_json(13, 1, "Landslide on NH-58"));

        let pasted = ImageFile::new("", "image/png", vec![1]);
        let article = h.store.create(draft(), &pasted).await.unwrap();
        assert_eq!(article.id, 13);

        assert_eq!(h.mock.uploads(), vec![String::new()]);
        let sent = h.mock.requests_to(Method::POST, "/articles");
        assert_eq!(
            sent[0].body.as_ref().unwrap()["image_url"],
            "https://cdn.example.com/pasted.png"
        );
    }

    #[tokio::test]
    async fn test_invalid_draft_uploads_nothing() {
        let h = seeded().await;
        let mut bad = draft();
        bad.title.clear();

        let image = ImageFile::new("nh58.jpg", "image/jpeg", vec![1]);
        let err = h.store.create(bad, &image).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(h.mock.uploads().is_empty());
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_status_change_reaches_every_cached_list() {
        let h = seeded().await;
        h.cache
            .set(&QueryKey::FeaturedArticles, &vec![fixtures::article(11, 2, "Tea gardens")])
            .await
            .unwrap();
        let mut body = fixtures::article_json(10, 1, "Snowfall in Auli");
        body["status"] = json!("approved");
        h.mock.respond(Method::PATCH, "/articles/10/status", body);

        h.store.update_status(10, ArticleStatus::Approved).await.unwrap();

        assert_eq!(list(&h, QueryKey::AllArticles).await[0].status, ArticleStatus::Approved);
        assert_eq!(
            list(&h, QueryKey::ArticlesByAuthor(1)).await[0].status,
            ArticleStatus::Approved
        );
        assert_eq!(list(&h, QueryKey::AllArticles).await[1].status, ArticleStatus::Draft);
        assert!(!h.cache.contains(&QueryKey::FeaturedArticles).await);
    }

    #[tokio::test]
    async fn test_update_keeps_list_length() {
        let h = seeded().await;
        let mut body = fixtures::article_json(11, 2, "Tea gardens of Kausani");
        body["content"] = json!("Body of Tea gardens");
        h.mock.respond(Method::PUT, "/articles/11", body);

        let mut changes = ArticleUpdate::new(11);
        changes.title = Some("Tea gardens of Kausani".into());
        h.store.update(changes, None).await.unwrap();

        let all = list(&h, QueryKey::AllArticles).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].title, "Tea gardens of Kausani");
        assert_eq!(all[0], fixtures::article(10, 1, "Snowfall in Auli"));
    }

    #[tokio::test]
    async fn test_delete_removes_everywhere() {
        let h = seeded().await;
        h.cache
            .set(&QueryKey::Article(10), &json!({ "stale": true }))
            .await
            .unwrap();
        h.mock.respond(Method::DELETE, "/articles/10", json!({ "deleted": true }));

        h.store.delete(10).await.unwrap();

        assert_eq!(list(&h, QueryKey::AllArticles).await.len(), 1);
        assert!(list(&h, QueryKey::ArticlesByAuthor(1)).await.is_empty());
        assert!(!h.cache.contains(&QueryKey::Article(10)).await);
    }

    #[tokio::test]
    async fn test_declined_delete_keeps_cache() {
        let h = seeded().await;
        h.mock.respond(Method::DELETE, "/articles/10", json!({ "deleted": false }));

        let err = h.store.delete(10).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(list(&h, QueryKey::AllArticles).await.len(), 2);
    }

    #[tokio::test]
    async fn test_featured_is_first_top_article() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::GET,
            "/articles/approved/top",
            json!([
                fixtures::article_json(3, 1, "Kedarnath reopens"),
                fixtures::article_json(4, 1, "Valley of Flowers"),
            ]),
        );
        let store = ArticleStore::new(
            ApiClient::new(mock.clone()),
            Arc::new(QueryCache::default()),
            &ApiConfig::default(),
        );

        let featured = store.featured().await.unwrap().unwrap();
        assert_eq!(featured.title, "Kedarnath reopens");
        assert_eq!(
            mock.requests()[0].query,
            vec![("limit".to_string(), "5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_featured_empty_when_nothing_approved() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::GET, "/articles/approved/top", json!([]));
        let store = ArticleStore::new(
            ApiClient::new(mock),
            Arc::new(QueryCache::default()),
            &ApiConfig::default(),
        );

        assert!(store.featured().await.unwrap().is_none());
    }
}
