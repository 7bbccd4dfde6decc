use crate::core::errors::PortalError;
use crate::infrastructure::source::{Row, Sheet, SheetSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory sheet fixture, used by tests and embedders that already hold
/// their rows.
#[derive(Clone, Default)]
pub struct InMemorySheets {
    sheets: Arc<RwLock<HashMap<Sheet, Vec<Row>>>>,
}

impl InMemorySheets {
    pub fn new() -> Self {
        InMemorySheets {
            sheets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, sheet: Sheet, rows: Vec<Row>) {
        self.sheets.write().await.insert(sheet, rows);
    }
}

#[async_trait]
impl SheetSource for InMemorySheets {
    async fn fetch_rows(&self, sheet: Sheet) -> Result<Vec<Row>, PortalError> {
        self.sheets
            .read()
            .await
            .get(&sheet)
            .cloned()
            .ok_or_else(|| PortalError::SheetNotFound(sheet.to_string()))
    }
}
