//! Cache facade over pluggable storage providers

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub mod memory;

pub use memory::MemoryCacheProvider;

/// Builds a value for `get_or_add` when the key is missing
pub type ValueFactory<V> = Box<dyn FnOnce() -> V + Send>;

/// Trait for cache storage backends.
///
/// `region` names an optional partition of the cache; `None` is the default
/// region.
#[async_trait]
pub trait CacheProvider<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Insert an entry that expires after `duration`
    async fn add(&self, key: &str, value: V, duration: Duration, region: Option<&str>) -> Result<()>;

    async fn get(&self, key: &str, region: Option<&str>) -> Result<Option<V>>;

    /// Remove an entry, returning its value if it was present
    async fn remove(&self, key: &str, region: Option<&str>) -> Result<Option<V>>;

    async fn contains(&self, key: &str, region: Option<&str>) -> Result<bool>;

    /// Remove every entry of a region, or of the whole cache when `region` is
    /// `None`. Returns the number of removed entries.
    async fn clear(&self, region: Option<&str>) -> Result<usize>;

    /// Get an entry, or add the value produced by `factory`
    async fn get_or_add(
        &self,
        key: &str,
        factory: ValueFactory<V>,
        duration: Duration,
        region: Option<&str>,
    ) -> Result<V>;
}

/// Represents the cache. Every call is forwarded to the provider.
pub struct Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    provider: Arc<dyn CacheProvider<V>>,
}

impl<V> Clone for Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(provider: Arc<dyn CacheProvider<V>>) -> Self {
        Self { provider }
    }

    pub async fn add(&self, key: &str, value: V, duration: Duration, region: Option<&str>) -> Result<()> {
        self.provider.add(key, value, duration, region).await
    }

    pub async fn get(&self, key: &str, region: Option<&str>) -> Result<Option<V>> {
        self.provider.get(key, region).await
    }

    pub async fn remove(&self, key: &str, region: Option<&str>) -> Result<Option<V>> {
        self.provider.remove(key, region).await
    }

    pub async fn contains(&self, key: &str, region: Option<&str>) -> Result<bool> {
        self.provider.contains(key, region).await
    }

    pub async fn clear(&self, region: Option<&str>) -> Result<usize> {
        self.provider.clear(region).await
    }

    pub async fn get_or_add<F>(
        &self,
        key: &str,
        factory: F,
        duration: Duration,
        region: Option<&str>,
    ) -> Result<V>
    where
        F: FnOnce() -> V + Send + 'static,
    {
        self.provider
            .get_or_add(key, Box::new(factory), duration, region)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> Cache<String> {
        Cache::new(Arc::new(MemoryCacheProvider::<String>::new()))
    }

    #[tokio::test]
    async fn test_cache_forwards_to_provider() {
        let cache = cache();
        let ttl = Duration::from_secs(60);

        cache.add("home", "/".to_string(), ttl, None).await.unwrap();
        assert!(cache.contains("home", None).await.unwrap());
        assert_eq!(cache.get("home", None).await.unwrap(), Some("/".to_string()));

        assert_eq!(cache.remove("home", None).await.unwrap(), Some("/".to_string()));
        assert!(!cache.contains("home", None).await.unwrap());
        assert_eq!(cache.remove("home", None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_or_add_only_builds_missing_values() {
        let cache = cache();
        let ttl = Duration::from_secs(60);

        let value = cache
            .get_or_add("k", || "first".to_string(), ttl, None)
            .await
            .unwrap();
        assert_eq!(value, "first");

        let value = cache
            .get_or_add("k", || "second".to_string(), ttl, None)
            .await
            .unwrap();
        assert_eq!(value, "first");
    }

    #[tokio::test]
    async fn test_clones_share_provider() {
        let cache = cache();
        let other = cache.clone();
        cache
            .add("k", "v".to_string(), Duration::from_secs(60), Some("r"))
            .await
            .unwrap();
        assert!(other.contains("k", Some("r")).await.unwrap());
        assert_eq!(other.clear(None).await.unwrap(), 1);
    }
}
