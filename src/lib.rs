//! Database bootstrap and client record types for the client registry backend.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod telemetry;

pub use config::{Config, DatabaseMode, DbSettings};
pub use db::{Database, Health};
pub use error::{ConfigError, DbError, ModelError};
