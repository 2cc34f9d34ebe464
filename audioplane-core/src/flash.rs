//! One-shot mutation confirmations
//!
//! A [`Flash`] is derived from the row a write returned and handed straight
//! to whoever renders the response. It is never stored.

use std::fmt;

use serde::Serialize;

/// Editable catalog entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Artist,
    Song,
    Playlist,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Artist => "artist",
            Self::Song => "song",
            Self::Playlist => "playlist",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashAction {
    Inserted,
    Updated,
    Deleted,
}

impl FlashAction {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Inserted => "✅",
            Self::Updated => "✏️",
            Self::Deleted => "🗑️",
        }
    }
}

impl fmt::Display for FlashAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inserted => "Inserted",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        })
    }
}

/// A record that can be confirmed back to the user after a write.
pub trait Flashable {
    const ENTITY: EntityKind;

    fn id(&self) -> i32;

    fn label(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub action: FlashAction,
    pub entity: EntityKind,
    pub id: i32,
    pub label: String,
    pub message: String,
}

impl Flash {
    pub fn new<T: Flashable>(action: FlashAction, record: &T) -> Self {
        let message = format!(
            "{} {}: {} (ID {})",
            action,
            T::ENTITY,
            record.label(),
            record.id()
        );
        Self {
            action,
            entity: T::ENTITY,
            id: record.id(),
            label: record.label().to_owned(),
            message,
        }
    }
}

impl fmt::Display for Flash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Artist;

    impl Flashable for Artist {
        const ENTITY: EntityKind = EntityKind::Artist;

        fn id(&self) -> i32 {
            7
        }

        fn label(&self) -> &str {
            "Test Artist"
        }
    }

    #[test]
    fn message_matches_confirmation_format() {
        let flash = Flash::new(FlashAction::Inserted, &Artist);
        assert_eq!(flash.to_string(), "Inserted artist: Test Artist (ID 7)");
        assert_eq!(flash.entity, EntityKind::Artist);
        assert_eq!(flash.id, 7);
    }

    #[test]
    fn serializes_snake_case() {
        let flash = Flash::new(FlashAction::Updated, &Artist);
        let json = serde_json::to_value(&flash).unwrap();
        assert_eq!(json["action"], "updated");
        assert_eq!(json["entity"], "artist");
    }
}
