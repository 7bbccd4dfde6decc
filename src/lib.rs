pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::PortalError;
pub use crate::core::services::PortalService;
pub use config::Config;
pub use infrastructure::cache::in_memory::InMemoryCache;
pub use infrastructure::source::cached::CachedSheets;
pub use infrastructure::source::in_memory::InMemorySheets;

#[cfg(test)]
mod tests;
