// Library exports for the disctag binary and integration tests

pub mod album;
pub mod cd_info;
pub mod config;
pub mod musicbrainz;
pub mod sanitize;
pub mod selection;

pub use album::{AlbumRecord, TagSource, Track, DEFAULT_ARTIST, DEFAULT_TITLE};
pub use config::Config;
