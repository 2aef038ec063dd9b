/// Owning account and file locations from environment variables
pub mod account;

/// Business settings and product catalog loading from ledger.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;
