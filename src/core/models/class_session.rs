use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated occurrence of a class group.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: String,
    pub class_group_id: String,
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub cancelled: bool,
}
