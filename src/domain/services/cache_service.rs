use std::time::Duration;

use async_trait::async_trait;

use crate::domain::error::CacheError;

/// Key/value cache with per-entry expiry.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
