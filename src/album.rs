//! Normalized album record shared by every tag source

use crate::sanitize::sanitize;
use serde::Serialize;
use std::fmt;

/// Album artist used when no source provides one
pub const DEFAULT_ARTIST: &str = "Unknown";
/// Album or track title used when no source provides one
pub const DEFAULT_TITLE: &str = "Untitled";

/// Where a record's tags came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagSource {
    Cddb,
    CdText,
    MusicBrainz,
    Custom,
}

impl TagSource {
    pub fn label(&self) -> &'static str {
        match self {
            TagSource::Cddb => "CDDB",
            TagSource::CdText => "CD-TEXT",
            TagSource::MusicBrainz => "MusicBrainz",
            TagSource::Custom => "Custom",
        }
    }
}

impl fmt::Display for TagSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single track's tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
}

/// Album tags as produced by CDDB, CD-TEXT, MusicBrainz or manual entry
///
/// Titles and artists are stored per track so both lists always have the
/// same length, and the track count is derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumRecord {
    pub album_artist: String,
    pub album_title: String,
    /// MusicBrainz DiscID, set when the record was matched against a disc
    pub disc_id: Option<String>,
    tracks: Vec<Track>,
    has_multiple_artists: bool,
    source: TagSource,
}

impl AlbumRecord {
    /// Create an empty record with default album artist and title
    pub fn new(source: TagSource) -> Self {
        Self {
            album_artist: DEFAULT_ARTIST.to_string(),
            album_title: DEFAULT_TITLE.to_string(),
            disc_id: None,
            tracks: Vec::new(),
            has_multiple_artists: false,
            source,
        }
    }

    /// Build a record from manually entered tags
    ///
    /// Tracks with an empty artist take the album artist.
    pub fn custom<I, T, A>(album_title: &str, album_artist: &str, tracks: I) -> Self
    where
        I: IntoIterator<Item = (T, A)>,
        T: Into<String>,
        A: Into<String>,
    {
        let mut album = Self::new(TagSource::Custom);
        if !album_title.trim().is_empty() {
            album.album_title = album_title.trim().to_string();
        }
        if !album_artist.trim().is_empty() {
            album.album_artist = album_artist.trim().to_string();
        }
        for (title, artist) in tracks {
            album.add_track(title, artist);
        }
        album
    }

    pub fn source(&self) -> TagSource {
        self.source
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_titles(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.title.as_str()).collect()
    }

    pub fn track_artists(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.artist.as_str()).collect()
    }

    pub fn has_multiple_artists(&self) -> bool {
        self.has_multiple_artists
    }

    /// Append a track; an empty artist is replaced by the album artist
    pub fn add_track(&mut self, title: impl Into<String>, artist: impl Into<String>) {
        let artist = artist.into();
        let artist = if artist.is_empty() {
            self.album_artist.clone()
        } else {
            artist
        };

        let differs = self
            .tracks
            .first()
            .is_some_and(|first| first.artist != artist);
        self.has_multiple_artists |= differs;

        self.tracks.push(Track {
            title: title.into(),
            artist,
        });
    }

    /// Recompute whether the tracks disagree on their artist
    pub fn check_multiple(&mut self) {
        self.has_multiple_artists = match self.tracks.split_first() {
            Some((first, rest)) => rest.iter().any(|t| t.artist != first.artist),
            None => false,
        };
    }

    /// Use one artist for every track
    pub fn apply_artist_to_all(&mut self, artist: &str) {
        for track in &mut self.tracks {
            track.artist = artist.to_string();
        }
        self.check_multiple();
    }

    /// Make every tag safe for file names and encoder metadata
    pub fn clean(&mut self) {
        self.album_artist = sanitize(&self.album_artist);
        self.album_title = sanitize(&self.album_title);
        for track in &mut self.tracks {
            track.title = sanitize(&track.title);
            track.artist = sanitize(&track.artist);
        }
        self.check_multiple();
    }

    /// Reset to an empty record, keeping the source
    pub fn clear(&mut self) {
        *self = Self::new(self.source);
    }
}

impl fmt::Display for AlbumRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Album title: {}", self.album_title)?;
        writeln!(f, "Album artist: {}", self.album_artist)?;
        writeln!(f, "Number of tracks: {}", self.track_count())?;
        for (idx, track) in self.tracks.iter().enumerate() {
            writeln!(f, "Track {}: {} - {}", idx + 1, track.artist, track.title)?;
        }
        Ok(())
    }
}
