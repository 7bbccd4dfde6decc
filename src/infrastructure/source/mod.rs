pub mod cached;
pub mod in_memory;

use crate::core::errors::PortalError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// A fixed-shape positional row as fetched from a sheet. Cells carry the
/// value kinds a spreadsheet produces: strings, numbers, booleans, nulls.
pub type Row = Vec<Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sheet {
    Families,
    Students,
    Attendance,
    Payments,
    Classes,
    ClassGroups,
    AdditionalFees,
}

impl Sheet {
    pub const ALL: [Sheet; 7] = [
        Sheet::Families,
        Sheet::Students,
        Sheet::Attendance,
        Sheet::Payments,
        Sheet::Classes,
        Sheet::ClassGroups,
        Sheet::AdditionalFees,
    ];
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sheet::Families => "Families",
            Sheet::Students => "Students",
            Sheet::Attendance => "Attendance",
            Sheet::Payments => "Payments",
            Sheet::Classes => "Classes",
            Sheet::ClassGroups => "ClassGroups",
            Sheet::AdditionalFees => "AdditionalFees",
        };
        write!(f, "{}", s)
    }
}

/// Contract with the tabular data source. Implementations return the full
/// row range of a sheet, header row included, or fail the request:
/// [`PortalError::SheetNotFound`] for a missing sheet,
/// [`PortalError::FetchFailed`] for a transient fetch failure.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_rows(&self, sheet: Sheet) -> Result<Vec<Row>, PortalError>;
}
