//! CDDB block of a cd-info report

use crate::album::{AlbumRecord, TagSource, DEFAULT_TITLE};
use crate::cd_info::extract::TextCursor;
use thiserror::Error;
use tracing::{debug, warn};

const ALBUM_ARTIST: &str = "Artist:";
const ALBUM_TITLE: &str = "Title:";
const TRACK_COUNT: &str = "Number of tracks:";
const TRACK_ARTIST: &str = "artist:";
const TRACK_TITLE: &str = "title:";

/// Highest track number a CDDB entry can describe
pub const MAX_CDDB_TRACKS: usize = 99;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CddbError {
    #[error("CDDB block has no track count")]
    MissingTrackCount,
    #[error("CDDB track count is not a number from 0 to 99: {0:?}")]
    InvalidTrackCount(String),
}

/// Parse the CDDB match printed by cd-info
///
/// Labels are read in report order: album artist, album title, track count,
/// then one `artist:`/`title:` pair per track. Only call this once
/// [`has_cddb_match`](crate::cd_info::has_cddb_match) says there is a match.
pub fn parse_cddb(text: &str) -> Result<AlbumRecord, CddbError> {
    let mut album = AlbumRecord::new(TagSource::Cddb);
    let mut cursor = TextCursor::new(text);

    if let Some(field) = cursor.take_field(ALBUM_ARTIST) {
        album.album_artist = field.value;
    }
    if let Some(field) = cursor.take_field(ALBUM_TITLE) {
        album.album_title = field.value;
    }

    let count_field = cursor
        .take_field(TRACK_COUNT)
        .ok_or(CddbError::MissingTrackCount)?;
    let track_count = count_field
        .value
        .parse::<usize>()
        .ok()
        .filter(|n| *n <= MAX_CDDB_TRACKS)
        .ok_or_else(|| CddbError::InvalidTrackCount(count_field.value.clone()))?;

    debug!(
        "CDDB: '{}' by '{}', {} tracks",
        album.album_title, album.album_artist, track_count
    );

    for track_number in 1..=track_count {
        // Both labels are searched from the end of the previous title line
        let artist = cursor.peek_field(TRACK_ARTIST);
        let title = cursor.peek_field(TRACK_TITLE);

        if let Some(end) = title.as_ref().or(artist.as_ref()).map(|f| f.line_end) {
            cursor.advance_to(end);
        }

        let title = title.map(|f| f.value).unwrap_or_else(|| {
            warn!("CDDB: track {} has no title", track_number);
            DEFAULT_TITLE.to_string()
        });
        let artist = artist.map(|f| f.value).unwrap_or_default();

        album.add_track(title, artist);
    }

    album.check_multiple();
    Ok(album)
}
