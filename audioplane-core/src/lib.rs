//! audioplane-core: data access for the Audioplane music catalog
//!
//! Two layers:
//! - [`db::Database`] - the pooled connection with per-connection session
//!   setup and the query/mutation primitives that never let a store error
//!   escape to the caller
//! - [`db::repos`] - the fixed catalog of parameterized reads and
//!   RETURNING-based writes, one repository per entity
//!
//! Input is validated into [`models`] types before anything is bound to SQL.

pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod graph;
pub mod models;

pub use config::{AppConfig, DbConfig, SslMode};
pub use db::{Database, Diagnostic, Fetched, Mutated};
pub use error::{ConfigError, DbError};
pub use flash::{Flash, FlashAction};
pub use graph::LikeGraph;
