/// Database connection and schema creation
pub mod database;

/// Catalog and staff seeding from config.toml
pub mod seed;

/// Application settings from config.toml and the environment
pub mod settings;
