use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A payment made by a family. Negative amounts are refunds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub family_id: String,
    pub date: NaiveDate,
    pub amount: f64,
}
