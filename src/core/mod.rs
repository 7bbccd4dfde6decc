pub mod errors;
pub mod fees;
pub mod ledger;
pub mod models;
pub mod projection;
pub mod services;
