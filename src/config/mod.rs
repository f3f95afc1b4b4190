use std::fmt;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3306;

/// Raw view of the recognized environment variables
#[derive(Debug, Default, Deserialize)]
struct EnvVars {
    use_db: Option<String>,
    db_name: Option<String>,
    db_user: Option<String>,
    db_pass: Option<String>,
    db_host: Option<String>,
    db_port: Option<u16>,
}

/// Connection parameters for the MySQL server.
///
/// Absent credentials are passed on as absent; the driver's defaults apply
/// and the liveness check reports whatever the server makes of them.
#[derive(Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Whether persistence is switched on, and with which credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseMode {
    /// `USE_DB=false`: no connection is ever made
    Disabled,
    Enabled(DbSettings),
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    database: DatabaseMode,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let vars = envy::from_env::<EnvVars>().map_err(ConfigError::from)?;

        Ok(Self::from_env_vars(vars)?)
    }

    /// Build configuration from an explicit set of `(NAME, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = envy::from_iter::<_, EnvVars>(vars.into_iter())?;
        Self::from_env_vars(vars)
    }

    fn from_env_vars(vars: EnvVars) -> Result<Self, ConfigError> {
        // Only the exact string "false" turns persistence off
        if vars.use_db.as_deref() == Some("false") {
            return Ok(Self {
                database: DatabaseMode::Disabled,
            });
        }

        for (var, value) in [("DB_NAME", &vars.db_name), ("DB_USER", &vars.db_user)] {
            if value.is_none() {
                warn!("{var} is not set, falling back to the driver default");
            }
        }

        Ok(Self {
            database: DatabaseMode::Enabled(DbSettings {
                name: vars.db_name,
                user: vars.db_user,
                password: vars.db_pass,
                host: vars.db_host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: vars.db_port.unwrap_or(DEFAULT_PORT),
            }),
        })
    }

    /// Get the resolved database mode
    pub fn database(&self) -> &DatabaseMode {
        &self.database
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}
