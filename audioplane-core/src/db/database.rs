//! Execution boundary between the repositories and the store
//!
//! `try_*` return the raw [`DbError`]. `run_*` catch it, log it, and hand
//! back an empty result carrying a [`Diagnostic`] instead. Repositories use
//! `run_*` only, so no store error ever reaches their callers.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};
use tracing::{debug, error, warn};

use super::pool::create_pool;
use crate::config::DbConfig;
use crate::error::DbError;
use crate::flash::{Flash, FlashAction, Flashable};

/// Extra time the client waits beyond the server-side statement timeout
/// before giving up on the round trip.
const DEADLINE_GRACE: Duration = Duration::from_secs(2);

/// Bound read statement returning rows of `T`
pub type BoundQuery<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;

/// What went wrong, as far as a user needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Store unreachable, pool exhausted, TLS or socket failure
    Connectivity,
    /// Statement cancelled by the statement timeout or the client deadline
    Timeout,
    /// Integrity constraint rejected the write (SQLSTATE class 23)
    Constraint,
    /// Anything else the store refused
    Query,
}

/// User-visible report of a caught store failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn from_error(err: &DbError) -> Self {
        Self {
            kind: classify(err),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            DiagnosticKind::Connectivity => "Database unavailable",
            DiagnosticKind::Timeout => "Query timed out",
            DiagnosticKind::Constraint => "Rejected by database constraint",
            DiagnosticKind::Query => "Query failed",
        };
        write!(f, "{}: {}", prefix, self.message)
    }
}

fn classify(err: &DbError) -> DiagnosticKind {
    match err {
        DbError::Deadline(_) => DiagnosticKind::Timeout,
        DbError::Sqlx(sqlx::Error::Database(db)) => match db.code().as_deref() {
            // query_canceled: raised when statement_timeout fires
            Some("57014") => DiagnosticKind::Timeout,
            Some(code) if code.starts_with("23") => DiagnosticKind::Constraint,
            Some(code) if code.starts_with("08") => DiagnosticKind::Connectivity,
            _ => DiagnosticKind::Query,
        },
        DbError::Sqlx(
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed,
        ) => DiagnosticKind::Connectivity,
        DbError::Sqlx(_) => DiagnosticKind::Query,
    }
}

/// Rows from a read, or nothing plus the reason.
#[derive(Debug, Clone, Serialize)]
pub struct Fetched<T> {
    pub rows: Vec<T>,
    pub diagnostic: Option<Diagnostic>,
}

impl<T> Fetched<T> {
    pub fn ok(rows: Vec<T>) -> Self {
        Self {
            rows,
            diagnostic: None,
        }
    }

    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            rows: Vec::new(),
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.diagnostic.is_none()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Fetched<U> {
        Fetched {
            rows: self.rows.into_iter().map(f).collect(),
            diagnostic: self.diagnostic,
        }
    }
}

/// Outcome of a single-row write.
///
/// `record` is the affected row as the store returned it. `None` with no
/// diagnostic means nothing matched (e.g. deleting a missing id).
#[derive(Debug, Clone, Serialize)]
pub struct Mutated<T> {
    pub action: FlashAction,
    pub record: Option<T>,
    pub diagnostic: Option<Diagnostic>,
}

impl<T: Flashable> Mutated<T> {
    /// One-shot confirmation for whoever performed this write.
    pub fn flash(&self) -> Option<Flash> {
        self.record
            .as_ref()
            .map(|record| Flash::new(self.action, record))
    }
}

impl<T> Mutated<T> {
    pub fn is_ok(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// The process-wide store handle. Cheap to clone (shares the pool).
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    deadline: Duration,
}

impl Database {
    /// Build the handle over a lazily connecting pool. Never fails: an
    /// unreachable store is reported by each `run_*` call instead.
    pub fn connect(config: &DbConfig) -> Self {
        Self::from_pool(create_pool(config), config.statement_timeout)
    }

    /// Wrap an existing pool. `statement_timeout` should match what the
    /// pool's sessions enforce; the client deadline is derived from it.
    pub fn from_pool(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            deadline: statement_timeout + DEADLINE_GRACE,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Round trip to the store (`SELECT 1`).
    pub async fn ping(&self) -> Result<(), DbError> {
        self.within_deadline(async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
        .await
    }

    /// Execute a bound read, returning every row.
    pub async fn try_query<'q, T>(&self, query: BoundQuery<'q, T>) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        self.within_deadline(async { Ok(query.fetch_all(&self.pool).await?) })
            .await
    }

    /// Execute a bound RETURNING statement inside its own transaction.
    ///
    /// Commits when the statement succeeds (whether or not a row matched),
    /// rolls back on any failure.
    pub async fn try_mutation<'q, T>(&self, query: BoundQuery<'q, T>) -> Result<Option<T>, DbError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        self.within_deadline(async {
            let mut tx = self.pool.begin().await?;
            match query.fetch_optional(&mut *tx).await {
                Ok(row) => {
                    tx.commit().await?;
                    Ok(row)
                }
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        warn!(error = %rollback_err, "rollback failed");
                    }
                    Err(err.into())
                }
            }
        })
        .await
    }

    /// [`Self::try_query`] with failures normalized into an empty result.
    pub async fn run_query<'q, T>(&self, view: &'static str, query: BoundQuery<'q, T>) -> Fetched<T>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        match self.try_query(query).await {
            Ok(rows) => {
                debug!(view, rows = rows.len(), "query ok");
                Fetched::ok(rows)
            }
            Err(err) => {
                let diagnostic = Diagnostic::from_error(&err);
                error!(view, kind = ?diagnostic.kind, error = %err, "query failed");
                Fetched::failed(diagnostic)
            }
        }
    }

    /// [`Self::try_mutation`] with failures normalized into a no-row outcome.
    pub async fn run_mutation<'q, T>(&self, action: FlashAction, query: BoundQuery<'q, T>) -> Mutated<T>
    where
        T: Flashable + for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let entity = T::ENTITY.as_str();
        match self.try_mutation(query).await {
            Ok(record) => {
                match &record {
                    Some(r) => debug!(entity, %action, id = r.id(), "mutation ok"),
                    None => debug!(entity, %action, "mutation matched no row"),
                }
                Mutated {
                    action,
                    record,
                    diagnostic: None,
                }
            }
            Err(err) => {
                let diagnostic = Diagnostic::from_error(&err);
                error!(entity, %action, kind = ?diagnostic.kind, error = %err, "mutation failed");
                Mutated {
                    action,
                    record: None,
                    diagnostic: Some(diagnostic),
                }
            }
        }
    }

    async fn within_deadline<R>(
        &self,
        work: impl Future<Output = Result<R, DbError>>,
    ) -> Result<R, DbError> {
        tokio::time::timeout(self.deadline, work)
            .await
            .map_err(|_| DbError::Deadline(self.deadline))?
    }
}
