use serde::{Deserialize, Serialize};

/// A recurring cohort. `default_price` is the fallback when a session carries
/// no explicit price of its own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    pub default_price: f64,
}
