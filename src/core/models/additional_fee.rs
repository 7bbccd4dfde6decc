use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An incidental charge against a student. Negative prices are credits.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdditionalFee {
    pub id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub notes: String,
    pub price: f64,
}
