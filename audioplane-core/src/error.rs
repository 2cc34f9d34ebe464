/// Structured error types for audioplane-core.
///
/// Uses `thiserror` so library consumers get composable errors. The
/// binary (audioplane-cli) wraps them with `anyhow` context.
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Startup configuration failures. These are fatal: the process must not
/// run with a partial store configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or blank
    #[error("missing required setting {var}")]
    Missing { var: &'static str },

    /// A variable is present but cannot be interpreted
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    /// Config file could not be read
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for our schema
    #[error("failed to parse config file {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// Store execution failures, caught at the [`crate::db::Database`] boundary.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The client-side deadline expired before the store answered
    #[error("query exceeded deadline of {}ms", .0.as_millis())]
    Deadline(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_setting_display() {
        let err = ConfigError::Missing { var: "PGPASSWORD" };
        assert_eq!(err.to_string(), "missing required setting PGPASSWORD");
    }

    #[test]
    fn invalid_setting_display() {
        let err = ConfigError::invalid("PGPORT", "not a port number");
        assert_eq!(err.to_string(), "invalid value for PGPORT: not a port number");
    }

    #[test]
    fn deadline_display() {
        let err = DbError::Deadline(Duration::from_secs(10));
        assert_eq!(err.to_string(), "query exceeded deadline of 10000ms");
    }
}
