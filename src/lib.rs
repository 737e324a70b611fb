pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod http_client;
pub mod leagues;
pub mod merge;
pub mod profile;
pub mod schema;
pub mod scrape;
pub mod table;

pub use error::{Result, StatsError};
