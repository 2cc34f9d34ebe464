//! Response envelopes shared by the routes

use audioplane_core::flash::{Flash, Flashable};
use audioplane_core::{Fetched, Mutated};
use serde::Serialize;

/// Rows of a list or view. `items` is empty whenever `diagnostic` is set.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub diagnostic: Option<String>,
}

impl<T> From<Fetched<T>> for ListResponse<T> {
    fn from(fetched: Fetched<T>) -> Self {
        Self {
            items: fetched.rows,
            diagnostic: fetched.diagnostic.map(|d| d.to_string()),
        }
    }
}

/// Outcome of a write. `record` and `flash` are null when nothing matched
/// or the store refused the write.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub record: Option<T>,
    pub flash: Option<Flash>,
    pub diagnostic: Option<String>,
}

impl<T: Flashable> From<Mutated<T>> for MutationResponse<T> {
    fn from(mutated: Mutated<T>) -> Self {
        let flash = mutated.flash();
        Self {
            record: mutated.record,
            flash,
            diagnostic: mutated.diagnostic.map(|d| d.to_string()),
        }
    }
}
