//! Article entity, classification enums and payloads

use super::{wire_enum, Identified};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

wire_enum! {
    /// Editorial lifecycle of an article
    ArticleStatus, "article status" {
        Draft => "draft",
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

wire_enum! {
    /// Desk an article is filed under
    Category, "category" {
        News => "news",
        Politics => "politics",
        Culture => "culture",
        Tourism => "tourism",
        Environment => "environment",
        Sports => "sports",
        Business => "business",
        Education => "education",
        Health => "health",
        Lifestyle => "lifestyle",
    }
}

wire_enum! {
    /// District an article reports from
    Region, "region" {
        Almora => "almora",
        Bageshwar => "bageshwar",
        Chamoli => "chamoli",
        Champawat => "champawat",
        Dehradun => "dehradun",
        Haridwar => "haridwar",
        Nainital => "nainital",
        PauriGarhwal => "pauri_garhwal",
        Pithoragarh => "pithoragarh",
        Rudraprayag => "rudraprayag",
        TehriGarhwal => "tehri_garhwal",
        UdhamSinghNagar => "udham_singh_nagar",
        Uttarkashi => "uttarkashi",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,

    /// List endpoints omit tags
    #[serde(default)]
    pub tags: Vec<String>,

    pub category: Category,
    pub region: Region,
    pub status: ArticleStatus,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub publish_date: Option<DateTime<Utc>>,
}

impl Identified for Article {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Article joined with its author's public profile (`/articles/view/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub author_name: String,
    pub author_email: String,
    pub author_profile_photo_url: Option<String>,
    pub author_about: Option<String>,
    pub author_profession: Option<String>,
}

/// Body of `POST /articles`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewArticle {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    pub author_id: i64,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    pub category: Category,
    pub region: Region,

    #[validate(length(min = 1))]
    pub image_url: String,
}

/// Body of `PUT /articles/{id}`. Only the fields that changed are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct ArticleUpdate {
    #[serde(skip)]
    pub id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ArticleUpdate {
    pub fn new(id: i64) -> Self {
        Self { id, ..Default::default() }
    }

    /// True when no field would be sent
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.category.is_none()
            && self.region.is_none()
            && self.status.is_none()
            && self.image_url.is_none()
    }
}

/// Body of `PATCH /articles/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArticleStatusChange {
    pub status: ArticleStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_parse_their_wire_names() {
        assert_eq!("pauri_garhwal".parse::<Region>().unwrap(), Region::PauriGarhwal);
        assert_eq!(Category::Culture.to_string(), "culture");
        assert_eq!(ArticleStatus::ALL.len(), 4);
        let err = "mars".parse::<Region>().unwrap_err();
        assert_eq!(err.kind, "region");
    }

    #[test]
    fn test_article_defaults_missing_tags() {
        let article: Article = serde_json::from_str(
            r#"{"id":3,"author_id":1,"title":"Hill farming returns","content":"...",
                "category":"environment","region":"almora","status":"pending",
                "image_url":null,"created_at":"2025-03-01T10:00:00Z",
                "updated_at":"2025-03-02T10:00:00Z","publish_date":null}"#,
        )
        .unwrap();
        assert!(article.tags.is_empty());
        assert_eq!(article.status, ArticleStatus::Pending);
    }

    #[test]
    fn test_article_rejects_unknown_category() {
        let result = serde_json::from_str::<Article>(
            r#"{"id":3,"author_id":1,"title":"t","content":"c",
                "category":"astrology","region":"almora","status":"draft",
                "image_url":null,"created_at":"2025-03-01T10:00:00Z",
                "updated_at":"2025-03-01T10:00:00Z","publish_date":null}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_view_flattens_article() {
        let view: ArticleView = serde_json::from_str(
            r#"{"id":9,"author_id":1,"title":"t","content":"c","tags":["react"],
                "category":"culture","region":"chamoli","status":"approved",
                "image_url":"/images/test.jpg","created_at":"2025-03-01T10:00:00Z",
                "updated_at":"2025-03-01T10:00:00Z","publish_date":"2025-03-01T10:00:00Z",
                "author_name":"John Doe","author_email":"john@example.com",
                "author_profile_photo_url":null,"author_about":"A passionate writer",
                "author_profession":"Journalist"}"#,
        )
        .unwrap();
        assert_eq!(view.article.id, 9);
        assert_eq!(view.article.tags, vec!["react".to_string()]);
        assert_eq!(view.author_name, "John Doe");
    }
}
