//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Reads take `Option<i64>` as row bound (`LIMIT NULL` is unbounded)
//! - Joined views use LEFT JOIN so the driving row is never dropped
//! - Writes RETURN the canonical projection, `None` when nothing matched

pub mod activity;
pub mod albums;
pub mod artists;
pub mod playlists;
pub mod songs;
pub mod users;

pub use activity::{ActivityRepo, LikeEdge, LikeEvent, UserActivity};
pub use albums::{Album, AlbumRepo, AlbumTrack, AlbumWithArtist};
pub use artists::{Artist, ArtistRepo, ArtistSongCount};
pub use playlists::{
    Playlist, PlaylistChoice, PlaylistEntry, PlaylistRepo, PlaylistWithCreator, SongsPerPlaylist,
};
pub use songs::{LikedSong, Song, SongPopularity, SongRepo, SongWithArtist};
pub use users::{User, UserRepo};
