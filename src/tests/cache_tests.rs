use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{header_for, seeded_sheets};
use crate::config::Config;
use crate::core::errors::PortalError;
use crate::core::services::PortalService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::cache::{Cache, cache_keys};
use crate::infrastructure::source::cached::CachedSheets;
use crate::infrastructure::source::in_memory::InMemorySheets;
use crate::infrastructure::source::{Row, Sheet, SheetSource};

struct CountingSheets {
    inner: InMemorySheets,
    fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl SheetSource for CountingSheets {
    async fn fetch_rows(&self, sheet: Sheet) -> Result<Vec<Row>, PortalError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_rows(sheet).await
    }
}

/// Source double whose every fetch fails transiently.
struct FailingSheets {
    fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl SheetSource for FailingSheets {
    async fn fetch_rows(&self, sheet: Sheet) -> Result<Vec<Row>, PortalError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(PortalError::FetchFailed(
            sheet.to_string(),
            "connection reset".to_string(),
        ))
    }
}

async fn counting_source() -> (CountingSheets, Arc<AtomicUsize>) {
    let inner = seeded_sheets(vec![(
        Sheet::Families,
        vec![vec![json!("f1"), json!("Rivera")]],
    )])
    .await;
    let fetches = Arc::new(AtomicUsize::new(0));
    (
        CountingSheets {
            inner,
            fetches: Arc::clone(&fetches),
        },
        fetches,
    )
}

#[tokio::test]
async fn cache_set_get_round_trip() {
    let cache = InMemoryCache::new();
    cache.set("k", &vec![1, 2, 3], None).await.unwrap();
    let value: Option<Vec<i32>> = cache.get("k").await.unwrap();
    assert_eq!(value, Some(vec![1, 2, 3]));

    cache.del("k").await.unwrap();
    let value: Option<Vec<i32>> = cache.get("k").await.unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
async fn expired_entry_reads_as_empty() {
    let cache = InMemoryCache::new();
    cache.set("k", &"v".to_string(), Some(0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let value: Option<String> = cache.get("k").await.unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
async fn wrong_type_read_is_a_cache_error() {
    let cache = InMemoryCache::new();
    cache.set("k", &"not rows".to_string(), None).await.unwrap();
    let result: Result<Option<Vec<Row>>, _> = cache.get("k").await;
    assert!(matches!(result, Err(PortalError::CacheError(_))));
}

#[tokio::test]
async fn second_fetch_is_served_from_cache() {
    let (source, fetches) = counting_source().await;
    let cached = CachedSheets::new(source, InMemoryCache::new(), Config::new("sheet-under-test"));

    let first = cached.fetch_rows(Sheet::Families).await.unwrap();
    let second = cached.fetch_rows(Sheet::Families).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn zero_ttl_always_refetches() {
    let (source, fetches) = counting_source().await;
    let config = Config {
        cache_ttl: Duration::ZERO,
        ..Config::new("sheet-under-test")
    };
    let cached = CachedSheets::new(source, InMemoryCache::new(), config);

    cached.fetch_rows(Sheet::Families).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    cached.fetch_rows(Sheet::Families).await.unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn corrupt_cache_entry_is_treated_as_a_miss() {
    let (source, fetches) = counting_source().await;
    let cache = InMemoryCache::new();
    let config = Config::new("sheet-under-test");

    // Pre-poison the key the decorator will read with a non-row payload.
    let key = cache_keys::sheet_rows_key("sheet-under-test", "Families");
    cache.set(&key, &"garbage".to_string(), None).await.unwrap();

    let cached = CachedSheets::new(source, cache, config);
    let rows = cached.fetch_rows(Sheet::Families).await.unwrap();

    assert_eq!(rows[0], header_for(Sheet::Families));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transient_fetch_failure_aborts_the_request() {
    let portal = PortalService::new(FailingSheets {
        fetches: Arc::new(AtomicUsize::new(0)),
    });
    let err = portal.get_families().await.unwrap_err();
    assert!(matches!(err, PortalError::FetchFailed(_, _)));
}

#[tokio::test]
async fn fetch_failures_are_not_cached() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let source = FailingSheets {
        fetches: Arc::clone(&fetches),
    };
    let cached = CachedSheets::new(source, InMemoryCache::new(), Config::new("sheet-under-test"));

    assert!(cached.fetch_rows(Sheet::Families).await.is_err());
    assert!(cached.fetch_rows(Sheet::Families).await.is_err());
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_sheet_error_passes_through_the_cache() {
    let inner = InMemorySheets::new();
    let cached = CachedSheets::new(inner, InMemoryCache::new(), Config::new("sheet-under-test"));
    let err = cached.fetch_rows(Sheet::Payments).await.unwrap_err();
    assert!(matches!(err, PortalError::SheetNotFound(_)));
}
