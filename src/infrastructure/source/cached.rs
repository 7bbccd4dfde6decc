use crate::config::Config;
use crate::core::errors::PortalError;
use crate::infrastructure::cache::{Cache, cache_keys};
use crate::infrastructure::source::{Row, Sheet, SheetSource};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Source decorator that owns the row cache at the data-source boundary.
/// Rows are cached per sheet for the configured TTL. A cache read that fails
/// to deserialize is treated as empty: logged and passed through to the inner
/// fetch.
pub struct CachedSheets<S: SheetSource, C: Cache> {
    inner: S,
    cache: C,
    config: Config,
}

impl<S: SheetSource, C: Cache> CachedSheets<S, C> {
    pub fn new(inner: S, cache: C, config: Config) -> Self {
        CachedSheets {
            inner,
            cache,
            config,
        }
    }

    fn key_for(&self, sheet: Sheet) -> String {
        cache_keys::sheet_rows_key(
            &self.config.spreadsheet_id,
            self.config.sheet_names.name_of(sheet),
        )
    }
}

#[async_trait]
impl<S: SheetSource, C: Cache> SheetSource for CachedSheets<S, C> {
    async fn fetch_rows(&self, sheet: Sheet) -> Result<Vec<Row>, PortalError> {
        let key = self.key_for(sheet);
        match self.cache.get::<Vec<Row>>(&key).await {
            Ok(Some(rows)) => {
                debug!(%sheet, rows = rows.len(), "serving sheet rows from cache");
                return Ok(rows);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(%sheet, error = %e, "cache read failed, treating as empty");
            }
        }

        let rows = self.inner.fetch_rows(sheet).await?;
        if let Err(e) = self
            .cache
            .set(&key, &rows, Some(self.config.cache_ttl.as_secs()))
            .await
        {
            warn!(%sheet, error = %e, "failed to cache sheet rows");
        }
        Ok(rows)
    }
}
