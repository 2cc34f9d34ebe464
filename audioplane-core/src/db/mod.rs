//! Database layer - connection manager and repositories
//!
//! # Design Principles
//!
//! - One pool for the process (max 5 connections, pre-use liveness check)
//! - Every statement parameterized; caller values are bound, never formatted
//! - Writes are single RETURNING statements in their own transaction
//! - Store failures stop at [`Database`]: callers get an empty result plus a
//!   [`Diagnostic`]

pub mod database;
pub mod pool;
pub mod repos;

pub use database::{BoundQuery, Database, Diagnostic, DiagnosticKind, Fetched, Mutated};
pub use pool::create_pool;
pub use repos::*;
