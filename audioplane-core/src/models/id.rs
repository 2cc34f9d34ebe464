//! Surrogate key and numeric field validation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Surrogate integer key of a catalog row.
///
/// Any value that fits the `INT` key column is accepted; ids that no row
/// carries (zero, negatives) simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct EntityId(i32);

impl EntityId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        i32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::OutOfRange { field: "id", value })
    }

    /// Parse an id typed into a form or passed on a command line.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }
        let value: i64 = trimmed.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "id",
            reason: "must be an integer",
        })?;
        Self::new(value)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for EntityId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for i32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl FromStr for EntityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared number of songs on a playlist (non-negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct SongCount(i32);

impl SongCount {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 || value > i64::from(i32::MAX) {
            return Err(ValidationError::OutOfRange {
                field: "number of songs",
                value,
            });
        }
        Ok(Self(value as i32))
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let value: i64 = s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: "number of songs",
            reason: "must be a whole number",
        })?;
        Self::new(value)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for SongCount {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SongCount> for i32 {
    fn from(count: SongCount) -> Self {
        count.0
    }
}
