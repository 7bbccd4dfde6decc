use serde::{Deserialize, Serialize};

/// Records that a student attended (or was billed for) a specific session.
/// `price` is the highest-priority override in the price precedence chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub notes: String,
    pub price: Option<f64>,
}
