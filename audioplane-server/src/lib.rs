//! audioplane-server: JSON HTTP API for the music catalog
//!
//! Every route is a thin adapter over the `audioplane-core` repositories.
//! Input is validated here; store failures come back as an empty result
//! plus a diagnostic, never as an HTTP error.

pub mod http;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
