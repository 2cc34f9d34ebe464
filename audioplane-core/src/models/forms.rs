//! Write payloads for the editable entities
//!
//! Each `*Form` is the raw, untyped input as a form or request body carries
//! it. Converting to the matching `New*` value validates every field, so a
//! `New*` that exists is safe to bind. Updates reuse the same payloads since
//! they replace the full row.

use serde::Deserialize;

use super::{DisplayName, Location, ReleaseDate, SongCount, ValidationError};

/// Raw user form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    pub username: String,
}

/// Validated user row
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: DisplayName,
}

impl TryFrom<UserForm> for NewUser {
    type Error = ValidationError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        Ok(Self {
            username: DisplayName::new("username", &form.username)?,
        })
    }
}

/// Raw artist form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Validated artist row
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub name: DisplayName,
    pub location: Location,
}

impl TryFrom<ArtistForm> for NewArtist {
    type Error = ValidationError;

    fn try_from(form: ArtistForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: DisplayName::new("artist name", &form.name)?,
            location: Location::new(form.location.as_deref())?,
        })
    }
}

/// Raw song form; the date stays text until validated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongForm {
    pub name: String,
    pub released: String,
}

/// Validated song row
#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub name: DisplayName,
    pub released: ReleaseDate,
}

impl TryFrom<SongForm> for NewSong {
    type Error = ValidationError;

    fn try_from(form: SongForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: DisplayName::new("song name", &form.name)?,
            released: ReleaseDate::parse(&form.released)?,
        })
    }
}

/// Raw playlist form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistForm {
    pub name: String,
    #[serde(default)]
    pub num_songs: i64,
}

/// Validated playlist row
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlaylist {
    pub name: DisplayName,
    pub num_songs: SongCount,
}

impl TryFrom<PlaylistForm> for NewPlaylist {
    type Error = ValidationError;

    fn try_from(form: PlaylistForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: DisplayName::new("playlist name", &form.name)?,
            num_songs: SongCount::new(form.num_songs)?,
        })
    }
}
