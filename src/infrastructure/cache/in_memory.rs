use crate::core::errors::PortalError;
use crate::infrastructure::cache::Cache;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory JSON cache with per-entry expiry. Values are stored serialized,
/// so a `get` at the wrong type surfaces as a deserialization error rather
/// than a panic.
#[derive(Clone, Default)]
pub struct InMemoryCache {
    store: Arc<RwLock<HashMap<String, (String, Option<std::time::Instant>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get<T: for<'a> Deserialize<'a> + Send + Sync>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PortalError> {
        let store = self.store.read().await;
        if let Some((value, expiry)) = store.get(key) {
            if expiry.is_none_or(|e| e > std::time::Instant::now()) {
                let deserialized = serde_json::from_str(value).map_err(|e| {
                    PortalError::CacheError(format!("Cache deserialization failed: {}", e))
                })?;
                Ok(Some(deserialized))
            } else {
                drop(store);
                let mut store = self.store.write().await;
                store.remove(key);
                Ok(None)
            }
        } else {
            Ok(None)
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<u64>,
    ) -> Result<(), PortalError> {
        let serialized = serde_json::to_string(value)
            .map_err(|e| PortalError::CacheError(format!("Cache serialization failed: {}", e)))?;
        let expiry = ttl.map(|t| std::time::Instant::now() + std::time::Duration::from_secs(t));
        let mut store = self.store.write().await;
        store.insert(key.to_string(), (serialized, expiry));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), PortalError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}
