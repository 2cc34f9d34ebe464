//! Text field validation
//!
//! Names are trimmed before validation, matching how the forms strip
//! surrounding whitespace before submitting.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ValidationError;

/// Maximum length for names (VARCHAR(255) columns)
const MAX_NAME_LEN: usize = 255;

/// Maximum length for a PostgreSQL identifier
const MAX_IDENTIFIER_LEN: usize = 63;

/// Plain unquoted SQL identifier: letter or underscore, then word characters
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid identifier regex"));

/// Validated display name (user name, artist name, song or playlist name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a name for `field`, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use audioplane_core::models::DisplayName;
    ///
    /// assert_eq!(DisplayName::new("song name", "  Anti-Hero ").unwrap().as_str(), "Anti-Hero");
    /// assert!(DisplayName::new("song name", "   ").is_err());
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Optional free-text location; blank input means "no location".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Location(Option<String>);

impl Location {
    pub fn new(s: Option<&str>) -> Result<Self, ValidationError> {
        match s.map(str::trim).filter(|t| !t.is_empty()) {
            None => Ok(Self(None)),
            Some(t) if t.chars().count() > MAX_NAME_LEN => Err(ValidationError::TooLong {
                field: "location",
                max: MAX_NAME_LEN,
            }),
            Some(t) => Ok(Self(Some(t.to_owned()))),
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Schema name placed first on the session `search_path`.
///
/// This is the only value ever interpolated into SQL text, so it is held to
/// a plain identifier and rendered quoted. It comes from server-side
/// configuration, never from request input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaName(String);

impl SchemaName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "schema" });
        }
        if s.len() > MAX_IDENTIFIER_LEN {
            return Err(ValidationError::TooLong {
                field: "schema",
                max: MAX_IDENTIFIER_LEN,
            });
        }
        if !IDENTIFIER_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "schema",
                reason: "must be letters, digits and underscores, not starting with a digit",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `SET search_path` directive: this schema first, then `public`.
    ///
    /// Unquoted identifiers fold to lower case in PostgreSQL, so the quoted
    /// form uses the folded name to resolve the same schema the unquoted
    /// directive would.
    pub fn search_path_sql(&self) -> String {
        format!(
            "SET search_path TO \"{}\", public",
            self.0.to_ascii_lowercase()
        )
    }
}
