//! Web story entity

use super::{ArticleStatus, Category, Identified, Region};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short visual story. Classification fields are optional because the
/// public listing does not carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebStory {
    pub id: i64,
    pub title: String,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub author_id: Option<i64>,

    #[serde(default)]
    pub status: Option<ArticleStatus>,

    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub region: Option<Region>,
}

impl Identified for WebStory {
    fn id(&self) -> i64 {
        self.id
    }
}
