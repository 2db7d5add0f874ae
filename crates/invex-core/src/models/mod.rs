//! Data models: the extracted record, persisted receipts and configuration.

pub mod config;
pub mod receipt;
pub mod record;
