//! Domain models with validation at construction
//!
//! All caller input is coerced into these types before binding.
//! Invalid input returns ValidationError, never reaches the store.

pub mod date;
pub mod forms;
pub mod id;
pub mod limit;
pub mod text;
pub mod validation;

pub use date::ReleaseDate;
pub use forms::{
    ArtistForm, NewArtist, NewPlaylist, NewSong, NewUser, PlaylistForm, SongForm, UserForm,
};
pub use id::{EntityId, SongCount};
pub use limit::{LimitParams, RowLimit, DEFAULT_ROW_LIMIT, MAX_ROW_LIMIT};
pub use text::{DisplayName, Location, SchemaName};
pub use validation::ValidationError;
