pub mod analyzers;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod records;
pub mod store;
