use chrono::{DateTime, Utc};

/// Outcome of the one-shot liveness check run after the pool is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    /// The check has not reported yet
    Pending,
    Healthy {
        checked_at: DateTime<Utc>,
    },
    Unhealthy {
        checked_at: DateTime<Utc>,
        error: String,
    },
}

impl Health {
    pub fn is_pending(&self) -> bool {
        matches!(self, Health::Pending)
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Health::Healthy { .. })
    }

    /// Error text of a failed check
    pub fn error(&self) -> Option<&str> {
        match self {
            Health::Unhealthy { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Health::Pending => None,
            Health::Healthy { checked_at } | Health::Unhealthy { checked_at, .. } => {
                Some(*checked_at)
            }
        }
    }
}
