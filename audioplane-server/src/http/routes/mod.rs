//! Route handlers organized by resource

pub mod activity;
pub mod albums;
pub mod artists;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod users;
