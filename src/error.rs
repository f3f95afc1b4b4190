use thiserror::Error;

/// Errors raised while reading environment configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
}

/// Errors raised by the database bootstrap
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Violations of client record invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("client has {0} primary locations, at most one is allowed")]
    MultiplePrimaryLocations(usize),

    #[error("client has no location with id '{0}'")]
    UnknownLocation(String),

    #[error("'{0}' is not a known area (expected norte, sul, leste, oeste or centro)")]
    InvalidArea(String),
}
