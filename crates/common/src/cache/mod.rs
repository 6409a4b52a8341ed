//! Query cache
//!
//! Client-side copy of server data, keyed per entity type and id. Values are
//! stored serialized so a single cache can hold every query result. Lists
//! are patched in place after confirmed mutations:
//! - create prepends
//! - update replaces by id
//! - delete removes by id
//! - soft delete patches one field by id

use crate::config::CacheConfig;
use crate::errors::{AppError, Result};
use crate::metrics;
use crate::models::Identified;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Cache keys. The `Display` form is the documented key string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `authors:all`
    AllAuthors,
    /// `author:{id}`
    Author(i64),
    /// `articles:all`
    AllArticles,
    /// `articles:author:{author_id}`
    ArticlesByAuthor(i64),
    /// `article:{id}`
    Article(i64),
    /// `articles:featured`
    FeaturedArticles,
    /// `stories:all`
    AllStories,
    /// `stories:author:{author_id}`
    StoriesByAuthor(i64),
    /// `tags:trending`
    TrendingTags,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::AllAuthors => write!(f, "authors:all"),
            QueryKey::Author(id) => write!(f, "author:{}", id),
            QueryKey::AllArticles => write!(f, "articles:all"),
            QueryKey::ArticlesByAuthor(id) => write!(f, "articles:author:{}", id),
            QueryKey::Article(id) => write!(f, "article:{}", id),
            QueryKey::FeaturedArticles => write!(f, "articles:featured"),
            QueryKey::AllStories => write!(f, "stories:all"),
            QueryKey::StoriesByAuthor(id) => write!(f, "stories:author:{}", id),
            QueryKey::TrendingTags => write!(f, "tags:trending"),
        }
    }
}

struct CacheEntry {
    value: serde_json::Value,
    stored_at: Instant,
}

/// In-memory query cache, shared by reference between stores
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
    stale_after: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_stale_after(Duration::from_secs(config.stale_secs))
    }

    pub fn with_stale_after(stale_after: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_after,
        }
    }

    /// Read a cached value regardless of its age
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Option<T>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => Ok(Some(from_value(key, entry.value.clone())?)),
            None => Ok(None),
        }
    }

    /// Store a value, resetting its age
    pub async fn set<T: Serialize>(&self, key: &QueryKey, value: &T) -> Result<()> {
        let value = to_value(key, value)?;
        self.entries.write().await.insert(
            *key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
        debug!(key = %key, "Cache set");
        Ok(())
    }

    /// Rewrite a cached value. The updater sees the current value (if any);
    /// returning `None` leaves the cache as it was. The age of an existing
    /// entry is preserved. Returns whether anything was written.
    pub async fn update<T, F>(&self, key: &QueryKey, updater: F) -> Result<bool>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> Option<T>,
    {
        let mut entries = self.entries.write().await;
        let current = match entries.get(key) {
            Some(entry) => Some(from_value::<T>(key, entry.value.clone())?),
            None => None,
        };

        let Some(next) = updater(current) else {
            return Ok(false);
        };
        let value = to_value(key, &next)?;

        match entries.get_mut(key) {
            Some(entry) => entry.value = value,
            None => {
                entries.insert(
                    *key,
                    CacheEntry {
                        value,
                        stored_at: Instant::now(),
                    },
                );
            }
        }
        Ok(true)
    }

    /// Drop a key; the next load refetches it
    pub async fn remove(&self, key: &QueryKey) -> bool {
        let removed = self.entries.write().await.remove(key).is_some();
        debug!(key = %key, removed, "Cache remove");
        removed
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// True when the key is missing or older than the staleness window
    pub async fn is_stale(&self, key: &QueryKey) -> bool {
        match self.entries.read().await.get(key) {
            Some(entry) => entry.stored_at.elapsed() >= self.stale_after,
            None => true,
        }
    }

    /// Keys currently cached, in no particular order
    pub async fn keys(&self) -> Vec<QueryKey> {
        self.entries.read().await.keys().copied().collect()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Return the cached value while fresh, otherwise run the loader and
    /// cache its result. A failed load leaves the cache untouched.
    pub async fn get_or_load<T, F, Fut>(&self, key: &QueryKey, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.is_stale(key).await {
            if let Some(cached) = self.get::<T>(key).await? {
                debug!(key = %key, "Cache hit");
                metrics::record_cache(true, &key.to_string());
                return Ok(cached);
            }
        }

        debug!(key = %key, "Cache miss");
        metrics::record_cache(false, &key.to_string());

        let value = loader().await?;
        self.set(key, &value).await?;
        Ok(value)
    }

    // ========================================================================
    // List patches
    // ========================================================================

    /// Put `item` first in a cached list. No-op when the list is not cached.
    pub async fn prepend<T>(&self, key: &QueryKey, item: &T) -> Result<bool>
    where
        T: Identified + Clone + Serialize + DeserializeOwned,
    {
        let patched = self
            .update::<Vec<T>, _>(key, |current| {
                current.map(|mut list| {
                    list.insert(0, item.clone());
                    list
                })
            })
            .await?;
        record_patch(key, "prepend", patched);
        Ok(patched)
    }

    /// Replace the element with the same id. Other elements are untouched.
    pub async fn replace_by_id<T>(&self, key: &QueryKey, item: &T) -> Result<bool>
    where
        T: Identified + Clone + Serialize + DeserializeOwned,
    {
        let patched = self
            .update::<Vec<T>, _>(key, |current| {
                current.map(|list| {
                    list.into_iter()
                        .map(|existing| {
                            if existing.id() == item.id() {
                                item.clone()
                            } else {
                                existing
                            }
                        })
                        .collect()
                })
            })
            .await?;
        record_patch(key, "replace", patched);
        Ok(patched)
    }

    /// Remove the element with `id` from a cached list
    pub async fn remove_by_id<T>(&self, key: &QueryKey, id: i64) -> Result<bool>
    where
        T: Identified + Serialize + DeserializeOwned,
    {
        let patched = self
            .update::<Vec<T>, _>(key, |current| {
                current.map(|list| list.into_iter().filter(|item| item.id() != id).collect())
            })
            .await?;
        record_patch(key, "remove", patched);
        Ok(patched)
    }

    /// Mutate the element with `id` in place
    pub async fn patch_by_id<T, F>(&self, key: &QueryKey, id: i64, patch: F) -> Result<bool>
    where
        T: Identified + Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let patched = self
            .update::<Vec<T>, _>(key, |current| {
                current.map(|mut list| {
                    if let Some(item) = list.iter_mut().find(|item| item.id() == id) {
                        patch(item);
                    }
                    list
                })
            })
            .await?;
        record_patch(key, "patch", patched);
        Ok(patched)
    }
}

fn record_patch(key: &QueryKey, operation: &'static str, patched: bool) {
    if patched {
        debug!(key = %key, operation, "Cache patched");
        metrics::record_patch(&key.to_string(), operation);
    }
}

fn to_value<T: Serialize>(key: &QueryKey, value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::Cache {
        message: format!("Failed to serialize value for '{}': {}", key, e),
    })
}

fn from_value<T: DeserializeOwned>(key: &QueryKey, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| AppError::Cache {
        message: format!("Failed to read cached value for '{}': {}", key, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: i64,
        label: String,
        active: bool,
    }

    impl Identified for Row {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, label: &str) -> Row {
        Row { id, label: label.to_string(), active: true }
    }

    #[test]
    fn test_key_strings() {
        assert_eq!(QueryKey::AllAuthors.to_string(), "authors:all");
        assert_eq!(QueryKey::Author(7).to_string(), "author:7");
        assert_eq!(QueryKey::ArticlesByAuthor(3).to_string(), "articles:author:3");
        assert_eq!(QueryKey::StoriesByAuthor(3).to_string(), "stories:author:3");
    }

    #[tokio::test]
    async fn test_prepend_puts_item_first() {
        let cache = QueryCache::default();
        let key = QueryKey::AllAuthors;
        cache.set(&key, &vec![row(1, "a"), row(2, "b")]).await.unwrap();

        assert!(cache.prepend(&key, &row(3, "c")).await.unwrap());

        let list: Vec<Row> = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id, 3);
    }

    #[tokio::test]
    async fn test_prepend_without_list_is_noop() {
        let cache = QueryCache::default();
        assert!(!cache.prepend(&QueryKey::AllAuthors, &row(3, "c")).await.unwrap());
        assert!(!cache.contains(&QueryKey::AllAuthors).await);
    }

    #[tokio::test]
    async fn test_replace_by_id_keeps_length_and_others() {
        let cache = QueryCache::default();
        let key = QueryKey::AllArticles;
        cache.set(&key, &vec![row(1, "a"), row(2, "b")]).await.unwrap();

        cache.replace_by_id(&key, &row(2, "B")).await.unwrap();

        let list: Vec<Row> = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(list, vec![row(1, "a"), row(2, "B")]);
    }

    #[tokio::test]
    async fn test_remove_and_patch_by_id() {
        let cache = QueryCache::default();
        let key = QueryKey::AllAuthors;
        cache.set(&key, &vec![row(1, "a"), row(2, "b"), row(3, "c")]).await.unwrap();

        cache.remove_by_id::<Row>(&key, 1).await.unwrap();
        cache.patch_by_id::<Row, _>(&key, 3, |r| r.active = false).await.unwrap();

        let list: Vec<Row> = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], row(2, "b"));
        assert_eq!(list[1], Row { id: 3, label: "c".into(), active: false });
    }

    #[tokio::test]
    async fn test_get_or_load_uses_fresh_entry() {
        let cache = QueryCache::default();
        let key = QueryKey::TrendingTags;

        let first: Vec<String> = cache
            .get_or_load(&key, || async { Ok(vec!["React".to_string()]) })
            .await
            .unwrap();
        let second: Vec<String> = cache
            .get_or_load(&key, || async { Ok(vec!["other".to_string()]) })
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_or_load_reloads_stale_entry() {
        let cache = QueryCache::with_stale_after(Duration::ZERO);
        let key = QueryKey::TrendingTags;
        cache.set(&key, &vec!["old".to_string()]).await.unwrap();

        let loaded: Vec<String> = cache
            .get_or_load(&key, || async { Ok(vec!["new".to_string()]) })
            .await
            .unwrap();
        assert_eq!(loaded, vec!["new".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_cache_untouched() {
        let cache = QueryCache::with_stale_after(Duration::ZERO);
        let key = QueryKey::AllStories;
        cache.set(&key, &vec![row(1, "a")]).await.unwrap();

        let result: Result<Vec<Row>> = cache
            .get_or_load(&key, || async {
                Err(AppError::Upload { message: "boom".into() })
            })
            .await;

        assert!(result.is_err());
        let kept: Vec<Row> = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(kept, vec![row(1, "a")]);
    }

    #[tokio::test]
    async fn test_wrong_type_is_cache_error() {
        let cache = QueryCache::default();
        cache.set(&QueryKey::TrendingTags, &vec!["x"]).await.unwrap();
        let err = cache.get::<Vec<Row>>(&QueryKey::TrendingTags).await.unwrap_err();
        assert!(matches!(err, AppError::Cache { .. }));
    }
}
