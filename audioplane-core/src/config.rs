//! Configuration: store credentials from the environment, presentation
//! settings from an optional TOML file.
//!
//! Environment variables (a `.env` file is honoured, see [`load_dotenv`]):
//!   PGHOST       store host (default: localhost)
//!   PGPORT       store port (default: 5432)
//!   PGDATABASE   database name (required)
//!   PGUSER       login role (required)
//!   PGPASSWORD   password (required)
//!   PGSSLMODE    TLS mode (default: require)
//!   PGSCHEMA     schema searched before `public` (default: PGUSER)
//!
//! Optional `~/.audioplane/config.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3030"
//! cors_permissive = false
//!
//! [display]
//! row_limit = 200
//!
//! [database]
//! max_connections = 5
//! statement_timeout_ms = 8000
//! ```

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgSslMode;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::models::{RowLimit, SchemaName, DEFAULT_ROW_LIMIT};

/// Bound on establishing a physical connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Server-side bound on any single statement
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Pool size; no overflow connections beyond this
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Physical connections are recycled after this long
pub const DEFAULT_MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// TLS mode for the store connection (libpq `sslmode` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    #[default]
    Require,
    VerifyCa,
    VerifyFull,
}

impl FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "allow" => Ok(Self::Allow),
            "prefer" => Ok(Self::Prefer),
            "require" => Ok(Self::Require),
            "verify-ca" => Ok(Self::VerifyCa),
            "verify-full" => Ok(Self::VerifyFull),
            other => Err(ConfigError::invalid(
                "PGSSLMODE",
                format!("unknown sslmode '{}'", other),
            )),
        }
    }
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Allow => PgSslMode::Allow,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}

/// Everything needed to open the connection pool.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub ssl_mode: SslMode,
    pub schema: SchemaName,
    pub connect_timeout: Duration,
    pub statement_timeout: Duration,
    pub max_connections: u32,
    pub max_lifetime: Duration,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("ssl_mode", &self.ssl_mode)
            .field("schema", &self.schema)
            .field("connect_timeout", &self.connect_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .field("max_connections", &self.max_connections)
            .field("max_lifetime", &self.max_lifetime)
            .finish()
    }
}

impl DbConfig {
    /// Read the store settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the store settings through `lookup` (env var name -> value).
    ///
    /// Blank values count as missing. Every required credential must be
    /// present; there is no partial configuration.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing { var: key });

        let database = require("PGDATABASE")?;
        let username = require("PGUSER")?;
        let password = require("PGPASSWORD")?;

        let host = get("PGHOST").unwrap_or_else(|| "localhost".to_string());
        let port = match get("PGPORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PGPORT", format!("'{}' is not a port", raw)))?,
            None => 5432,
        };
        let ssl_mode = match get("PGSSLMODE") {
            Some(raw) => raw.parse()?,
            None => SslMode::default(),
        };
        let schema_raw = get("PGSCHEMA").unwrap_or_else(|| username.clone());
        let schema = SchemaName::new(schema_raw.trim())
            .map_err(|e| ConfigError::invalid("PGSCHEMA", e.to_string()))?;

        Ok(Self {
            host,
            port,
            database,
            username,
            password,
            ssl_mode,
            schema,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_lifetime: DEFAULT_MAX_LIFETIME,
        })
    }

    /// Apply pool tuning from the config file.
    ///
    /// # Errors
    ///
    /// A zero timeout is rejected: Postgres reads `statement_timeout = 0` as
    /// "no limit", and a zero acquire timeout fails every checkout.
    pub fn with_tuning(mut self, tuning: &DatabaseSection) -> Result<Self, ConfigError> {
        if let Some(max) = tuning.max_connections {
            self.max_connections = max.max(1);
        }
        if let Some(ms) = tuning.statement_timeout_ms {
            self.statement_timeout = Duration::from_millis(nonzero("statement_timeout_ms", ms)?);
        }
        if let Some(secs) = tuning.connect_timeout_secs {
            self.connect_timeout = Duration::from_secs(nonzero("connect_timeout_secs", secs)?);
        }
        Ok(self)
    }
}

fn nonzero(var: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::invalid(var, "must be greater than zero"));
    }
    Ok(value)
}

// ============================================================================
// TOML Configuration
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub display: DisplaySection,

    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    #[serde(default)]
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_permissive: false,
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3030))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Rows fetched by table views when the caller gives no limit
    #[serde(default = "default_row_limit")]
    pub row_limit: i64,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            row_limit: default_row_limit(),
        }
    }
}

impl DisplaySection {
    pub fn row_limit(&self) -> RowLimit {
        RowLimit::new(self.row_limit)
    }
}

fn default_row_limit() -> i64 {
    DEFAULT_ROW_LIMIT
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub max_connections: Option<u32>,
    pub statement_timeout_ms: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load `~/.audioplane/config.toml`, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// The audioplane config directory (~/.audioplane)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".audioplane"))
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Variables already set in the environment
/// 2. Current directory .env
/// 3. ~/.audioplane/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path.display().to_string());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy never overwrites variables that are already set
            match dotenvy::from_path(&env_file) {
                Ok(()) => loaded_from.push(env_file.display().to_string()),
                Err(e) => debug!("failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("no .env files found, using environment variables only");
    } else {
        info!("loaded environment from: {}", loaded_from.join(", "));
    }
}
