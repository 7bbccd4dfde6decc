pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::PortalError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value from the cache by key
    async fn get<T: for<'a> Deserialize<'a> + Send + Sync>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PortalError>;

    /// Set a value in the cache with an optional TTL (in seconds)
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<u64>,
    ) -> Result<(), PortalError>;

    /// Delete a key from the cache
    async fn del(&self, key: &str) -> Result<(), PortalError>;
}
