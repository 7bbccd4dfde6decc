use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub family_id: String,
    pub class_group_id: String,
    pub active: bool,
    pub enrollment_start: Option<NaiveDate>,
    pub enrollment_end: Option<NaiveDate>,
}

impl Student {
    /// Whether `date` falls inside the student's enrollment window. A missing
    /// bound leaves that side of the window open.
    pub fn enrolled_on(&self, date: NaiveDate) -> bool {
        self.enrollment_start.is_none_or(|start| date >= start)
            && self.enrollment_end.is_none_or(|end| date <= end)
    }
}
