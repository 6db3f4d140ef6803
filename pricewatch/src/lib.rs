pub mod assets;
pub mod config;
pub mod db;
pub mod format;
pub mod metrics;
pub mod notify;
pub mod pipeline;
pub mod quotes;
pub mod scheduler;
pub mod store;

pub mod error;
pub mod logger;
