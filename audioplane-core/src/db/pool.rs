//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Every new physical
//! connection gets the session setup before it is handed out.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};
use tracing::debug;

use crate::config::DbConfig;

/// Directive bounding every statement on the session, in milliseconds.
pub fn statement_timeout_sql(config: &DbConfig) -> String {
    format!(
        "SET statement_timeout TO {}",
        config.statement_timeout.as_millis()
    )
}

/// Connection options built from the validated config (no URL parsing,
/// so passwords with reserved characters need no escaping).
pub fn connect_options(config: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.username)
        .password(&config.password)
        .ssl_mode(config.ssl_mode.into())
        .application_name("audioplane")
}

/// Create the PostgreSQL connection pool.
///
/// - at most `max_connections` physical connections, no overflow
/// - liveness check before a pooled connection is reused
/// - connections recycled after `max_lifetime`
/// - `connect_timeout` bounds both connecting and waiting for a free slot
///
/// Nothing is dialed here. Connections open on first use, so a store that
/// is down at startup shows up as a failed query rather than a failed pool.
/// Must be called from within a Tokio runtime.
pub fn create_pool(config: &DbConfig) -> PgPool {
    let statement_timeout = statement_timeout_sql(config);
    let search_path = config.schema.search_path_sql();

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .max_lifetime(config.max_lifetime)
        .test_before_acquire(true)
        .after_connect(move |conn, _meta| {
            let statement_timeout = statement_timeout.clone();
            let search_path = search_path.clone();
            Box::pin(async move {
                (&mut *conn).execute(statement_timeout.as_str()).await?;
                (&mut *conn).execute(search_path.as_str()).await?;
                debug!("session configured: {}; {}", statement_timeout, search_path);
                Ok(())
            })
        })
        .connect_lazy_with(connect_options(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use std::time::Duration;

    fn config() -> DbConfig {
        DbConfig::from_lookup(|key| match key {
            "PGDATABASE" => Some("music".into()),
            "PGUSER" => Some("nighthawk".into()),
            "PGPASSWORD" => Some("p@ss/word".into()),
            "PGSSLMODE" => Some("disable".into()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn statement_timeout_in_millis() {
        let mut config = config();
        assert_eq!(statement_timeout_sql(&config), "SET statement_timeout TO 8000");

        config.statement_timeout = Duration::from_secs(2);
        assert_eq!(statement_timeout_sql(&config), "SET statement_timeout TO 2000");
    }

    #[test]
    fn options_carry_config() {
        let options = connect_options(&config());
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_database(), Some("music"));
        assert_eq!(options.get_username(), "nighthawk");
    }

    #[tokio::test]
    async fn pool_opens_without_reaching_the_store() {
        let mut config = config();
        config.port = 1;
        config.connect_timeout = Duration::from_millis(200);

        let pool = create_pool(&config);
        assert_eq!(pool.size(), 0);
        assert!(sqlx::query("SELECT 1").execute(&pool).await.is_err());
    }

    // Integration tests require a real database
    // Run with: PGDATABASE=... PGUSER=... PGPASSWORD=... cargo test -p audioplane-core -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn session_setup_applies_to_new_connections() {
        let config = DbConfig::from_env().expect("PG* variables required");
        let pool = create_pool(&config);

        let (timeout,): (String,) = sqlx::query_as("SHOW statement_timeout")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(timeout, "8s");

        let (path,): (String,) = sqlx::query_as("SHOW search_path")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert!(path.ends_with("public"), "unexpected search_path {path}");
    }
}
