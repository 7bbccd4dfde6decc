use dotenv::dotenv;
use std::env;
use std::time::Duration;

use crate::infrastructure::source::Sheet;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Tab names for each logical table in the backing spreadsheet.
#[derive(Clone, Debug)]
pub struct SheetNames {
    pub families: String,
    pub students: String,
    pub attendance: String,
    pub payments: String,
    pub classes: String,
    pub class_groups: String,
    pub additional_fees: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        SheetNames {
            families: "Families".to_string(),
            students: "Students".to_string(),
            attendance: "Attendance".to_string(),
            payments: "Payments".to_string(),
            classes: "Classes".to_string(),
            class_groups: "ClassGroups".to_string(),
            additional_fees: "AdditionalFees".to_string(),
        }
    }
}

impl SheetNames {
    pub fn name_of(&self, sheet: Sheet) -> &str {
        match sheet {
            Sheet::Families => &self.families,
            Sheet::Students => &self.students,
            Sheet::Attendance => &self.attendance,
            Sheet::Payments => &self.payments,
            Sheet::Classes => &self.classes,
            Sheet::ClassGroups => &self.class_groups,
            Sheet::AdditionalFees => &self.additional_fees,
        }
    }
}

/// Identifies the backing data source. Passed explicitly to the pieces that
/// need it; there is no process-wide static.
#[derive(Clone, Debug)]
pub struct Config {
    pub spreadsheet_id: String,
    pub sheet_names: SheetNames,
    pub cache_ttl: Duration,
}

impl Config {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Config {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_names: SheetNames::default(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }

    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            spreadsheet_id: env::var("SHEET_ID").unwrap_or_default(),
            sheet_names: SheetNames::default(),
            cache_ttl: Duration::from_secs(
                env::var("CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            ),
        }
    }
}
