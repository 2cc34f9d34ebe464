//! Release date validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Date a song or album was released, `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseDate(NaiveDate);

impl ReleaseDate {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "release date",
            });
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "release date",
                reason: "expected a calendar date as YYYY-MM-DD",
            })
    }

    pub fn get(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ReleaseDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
