//! Row limit for table views
//!
//! The repositories take a plain `Option<i64>`; this type is the bound the
//! presentation layer applies before calling them.

use serde::Deserialize;

/// Largest number of rows a view may request
pub const MAX_ROW_LIMIT: i64 = 2000;

/// Rows shown when the caller does not choose
pub const DEFAULT_ROW_LIMIT: i64 = 200;

/// Number of rows a table view should fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLimit(i64);

impl RowLimit {
    /// Create a limit, clamped to 1..=2000.
    pub fn new(rows: i64) -> Self {
        Self(rows.clamp(1, MAX_ROW_LIMIT))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// The bound as the repositories take it.
    pub fn bound(self) -> Option<i64> {
        Some(self.0)
    }
}

impl Default for RowLimit {
    fn default() -> Self {
        Self(DEFAULT_ROW_LIMIT)
    }
}

/// Query parameters for list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

impl LimitParams {
    /// Resolve against a fallback (the configured default row limit).
    pub fn resolve(self, fallback: RowLimit) -> RowLimit {
        self.limit.map(RowLimit::new).unwrap_or(fallback)
    }
}
