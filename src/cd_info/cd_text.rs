//! CD-TEXT block of a cd-info report
//!
//! cd-info prints one `CD-TEXT for Disc:` section followed by one
//! `CD-TEXT for Track N:` section per track, each holding optional `TITLE:`
//! and `PERFORMER:` lines. Missing values never fail the parse:
//!
//! - disc without `TITLE:` → `UNTITLED`
//! - disc without `PERFORMER:` → `UNKNOWN`
//! - track without `TITLE:` → `TRACK 07` (two-digit track number)
//! - track without `PERFORMER:` → the disc performer

use crate::album::{AlbumRecord, TagSource};
use crate::cd_info::extract::find_field;
use std::ops::Range;
use tracing::{debug, warn};

pub const CD_TEXT_UNTITLED: &str = "UNTITLED";
pub const CD_TEXT_UNKNOWN: &str = "UNKNOWN";

const DISC_MARKER: &str = "Disc:";
const SECTION_MARKER: &str = "CD-TEXT";
const TITLE: &str = "TITLE:";
const PERFORMER: &str = "PERFORMER:";

/// Offset of the next `CD-TEXT` marker at or after `from`
fn next_section(text: &str, from: usize) -> Option<usize> {
    find_field(text, SECTION_MARKER, from..text.len()).map(|f| f.label_start)
}

fn field_value(text: &str, label: &str, window: Range<usize>) -> Option<String> {
    find_field(text, label, window).map(|f| f.value)
}

/// Windows of successive `CD-TEXT` sections
///
/// Each window starts after the section's header line and ends at the next
/// `CD-TEXT` marker, or at the end of the text for the last section.
struct Sections<'a> {
    text: &'a str,
    next_marker: Option<usize>,
}

impl Iterator for Sections<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let marker = self.next_marker.take()?;
        let len = self.text.len();
        let header = find_field(self.text, SECTION_MARKER, marker..len)?;

        let start = header.line_end;
        self.next_marker = next_section(self.text, start);
        Some(start..self.next_marker.unwrap_or(len))
    }
}

/// Parse the CD-TEXT sections printed by cd-info
pub fn parse_cd_text(text: &str) -> AlbumRecord {
    let mut album = AlbumRecord::new(TagSource::CdText);
    let len = text.len();

    let Some(disc) = find_field(text, DISC_MARKER, 0..len) else {
        warn!("CD-TEXT: no disc section found, using placeholders");
        album.album_title = CD_TEXT_UNTITLED.to_string();
        album.album_artist = CD_TEXT_UNKNOWN.to_string();
        return album;
    };

    let first_track = next_section(text, disc.line_end);
    let disc_window = disc.line_end..first_track.unwrap_or(len);

    album.album_title = field_value(text, TITLE, disc_window.clone())
        .unwrap_or_else(|| CD_TEXT_UNTITLED.to_string());
    album.album_artist = field_value(text, PERFORMER, disc_window)
        .unwrap_or_else(|| CD_TEXT_UNKNOWN.to_string());

    let sections = Sections {
        text,
        next_marker: first_track,
    };
    for (idx, window) in sections.enumerate() {
        let track_number = idx + 1;
        let title = field_value(text, TITLE, window.clone())
            .unwrap_or_else(|| format!("TRACK {:02}", track_number));
        let artist = field_value(text, PERFORMER, window)
            .unwrap_or_else(|| album.album_artist.clone());
        debug!("CD-TEXT: track {}: {} - {}", track_number, artist, title);
        album.add_track(title, artist);
    }

    album.check_multiple();

    // Recover a disc performer that only the tracks recorded
    if album.album_artist == CD_TEXT_UNKNOWN && !album.has_multiple_artists() {
        if let Some(artist) = album.tracks().first().map(|t| t.artist.clone()) {
            debug!(
                "CD-TEXT: using common track performer '{}' for disc",
                artist
            );
            album.album_artist = artist;
        }
    }

    album
}
