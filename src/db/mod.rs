mod conventions;
mod health;

use anyhow::Result;
use log::LevelFilter;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, Connection, MySqlPool};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::{Config, DatabaseMode, DbSettings};
use crate::error::DbError;

pub use conventions::TableConventions;
pub use health::Health;

/// 4-byte UTF-8, so text columns accept the full Unicode range
pub const CHARSET: &str = "utf8mb4";

/// Pool ceiling, same as the driver's out-of-the-box pool
pub const MAX_CONNECTIONS: u32 = 5;

/// Handle to the MySQL server shared by every consumer that needs persistence
pub struct Database {
    pool: MySqlPool,
    conventions: TableConventions,
    health: watch::Receiver<Health>,
    checker: JoinHandle<()>,
}

impl Database {
    /// Build the pool and start the liveness check in the background.
    ///
    /// Returns as soon as the pool exists; no connection is opened here.
    /// Must be called from within a Tokio runtime.
    pub fn new(settings: &DbSettings) -> Self {
        let options = connect_options(settings);

        let pool = MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy_with(options.clone());

        let (tx, rx) = watch::channel(Health::Pending);
        let checker = tokio::spawn(async move {
            tx.send_replace(liveness_outcome(check_liveness(&options).await));
        });

        Self {
            pool,
            conventions: TableConventions::default(),
            health: rx,
            checker,
        }
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn conventions(&self) -> TableConventions {
        self.conventions
    }

    /// Latest known liveness status; `Pending` until the check reports
    pub fn health(&self) -> Health {
        self.health.borrow().clone()
    }

    /// Wait for the liveness check to report and return its outcome
    pub async fn wait_for_health(&self) -> Health {
        let mut rx = self.health.clone();
        loop {
            let current = rx.borrow_and_update().clone();
            if !current.is_pending() {
                return current;
            }
            // Sender dropped without reporting: the check was aborted
            if rx.changed().await.is_err() {
                return rx.borrow().clone();
            }
        }
    }

    /// Stop an unfinished liveness check and close every pooled connection
    pub async fn close(self) {
        self.checker.abort();
        self.pool.close().await;
        info!("database pool closed");
    }
}

fn connect_options(settings: &DbSettings) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .charset(CHARSET);

    // Absent credentials keep the driver defaults
    let options = match &settings.user {
        Some(user) => options.username(user),
        None => options,
    };
    let options = match &settings.name {
        Some(name) => options.database(name),
        None => options,
    };
    let options = match &settings.password {
        Some(password) => options.password(password),
        None => options,
    };

    options.log_statements(LevelFilter::Off)
}

/// Open one dedicated connection, ping it and close it again.
///
/// Runs outside the pool so a refused connection fails once instead of being
/// retried until the acquire timeout. The outcome is decided by the ping; a
/// failing close afterwards is only logged.
async fn check_liveness(options: &MySqlConnectOptions) -> Result<(), DbError> {
    let mut conn = options.connect().await?;
    conn.ping().await?;

    if let Err(err) = conn.close().await {
        warn!("liveness check connection did not close cleanly: {err}");
    }
    Ok(())
}

/// Log the liveness result and turn it into a `Health`
fn liveness_outcome(result: Result<(), DbError>) -> Health {
    match result {
        Ok(()) => {
            info!("database connection established");
            Health::Healthy {
                checked_at: chrono::Utc::now(),
            }
        }
        Err(err) => {
            error!("failed to connect to database: {err}");
            Health::Unhealthy {
                checked_at: chrono::Utc::now(),
                error: err.to_string(),
            }
        }
    }
}

/// Initialize the database handle, or `None` when persistence is disabled
pub async fn init(config: &Config) -> Result<Option<Database>> {
    match config.database() {
        DatabaseMode::Disabled => {
            info!("database disabled (mock mode), no connection will be made");
            Ok(None)
        }
        DatabaseMode::Enabled(settings) => {
            info!(
                host = %settings.host,
                port = settings.port,
                database = settings.name.as_deref().unwrap_or_default(),
                "configuring database client"
            );
            Ok(Some(Database::new(settings)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_settings() -> DbSettings {
        DbSettings {
            name: Some("hive".to_string()),
            user: Some("hive_app".to_string()),
            password: Some("s3cret".to_string()),
            host: "127.0.0.1".to_string(),
            // Reserved port, nothing listens there
            port: 1,
        }
    }

    #[tokio::test]
    async fn new_returns_before_the_check_reports() {
        let db = Database::new(&unreachable_settings());
        assert_eq!(db.conventions(), TableConventions::default());
        assert!(!db.get_pool().is_closed());
        db.close().await;
    }

    #[tokio::test]
    async fn refused_connection_marks_handle_unhealthy() {
        let db = Database::new(&unreachable_settings());
        let health = db.wait_for_health().await;

        assert!(!health.is_healthy());
        assert!(health.checked_at().is_some());
        assert!(!health.error().unwrap_or_default().is_empty());
        // The pool stays usable as a handle whatever the check found
        assert!(!db.get_pool().is_closed());
        assert_eq!(db.health(), health);

        db.close().await;
    }

    #[test]
    fn connect_options_carry_charset_and_credentials() {
        let options = connect_options(&unreachable_settings());
        assert_eq!(options.get_charset(), "utf8mb4");
        assert_eq!(options.get_username(), "hive_app");
        assert_eq!(options.get_database(), Some("hive"));
        assert_eq!(options.get_port(), 1);
    }

    #[test]
    fn absent_credentials_keep_driver_defaults() {
        let settings = DbSettings {
            name: None,
            user: None,
            password: None,
            ..unreachable_settings()
        };
        let options = connect_options(&settings);
        let defaults = MySqlConnectOptions::new();

        assert_eq!(options.get_username(), defaults.get_username());
        assert_eq!(options.get_database(), None);
        assert_eq!(options.get_host(), "127.0.0.1");
    }

    #[tokio::test]
    async fn missing_credentials_still_build_a_handle_and_check() {
        let settings = DbSettings {
            name: None,
            user: None,
            password: None,
            ..unreachable_settings()
        };
        let db = Database::new(&settings);
        let health = db.wait_for_health().await;

        assert!(health.error().is_some());
        db.close().await;
    }

    #[test]
    fn successful_ping_is_healthy() {
        assert!(liveness_outcome(Ok(())).is_healthy());
    }

    #[test]
    fn failed_ping_keeps_the_error_text() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        let expected = err.to_string();

        let health = liveness_outcome(Err(err));
        assert_eq!(health.error(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn close_aborts_a_pending_check() {
        let db = Database::new(&unreachable_settings());
        let pool = db.get_pool().clone();
        db.close().await;
        assert!(pool.is_closed());
    }
}
