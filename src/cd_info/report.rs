//! Full cd-info report handling: locating the analysis section, splitting it
//! into its CDDB and CD-TEXT blocks and running the matching parsers

use crate::album::AlbumRecord;
use crate::cd_info::cd_text::parse_cd_text;
use crate::cd_info::cddb::{parse_cddb, CddbError};
use chardetng::EncodingDetector;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Marker line cd-info prints before the CDDB and CD-TEXT output
pub const ANALYSIS_REPORT_MARKER: &str = "CD Analysis Report";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No analysis report section in cd-info output")]
    MissingAnalysisReport,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two metadata blocks of a cd-info analysis report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSections<'a> {
    pub cddb: &'a str,
    pub cd_text: &'a str,
}

/// Tags found in a cd-info report
///
/// A CDDB block that fails to parse is kept as its error so callers can
/// tell it apart from a disc without CDDB data and fall back to CD-TEXT.
#[derive(Debug)]
pub struct ReportTags {
    pub cddb: Option<Result<AlbumRecord, CddbError>>,
    pub cd_text: Option<AlbumRecord>,
}

impl ReportTags {
    /// Every record that parsed, CDDB first
    pub fn records(&self) -> Vec<&AlbumRecord> {
        let cddb = self.cddb.as_ref().and_then(|r| r.as_ref().ok());
        cddb.into_iter().chain(self.cd_text.as_ref()).collect()
    }
}

/// Split cd-info output into its CDDB and CD-TEXT blocks
///
/// Everything after the analysis report marker up to the first blank line is
/// the CDDB block; the rest is the CD-TEXT block.
pub fn split_report(text: &str) -> Result<ReportSections<'_>, ReportError> {
    let (_, analysis) = text
        .split_once(ANALYSIS_REPORT_MARKER)
        .ok_or(ReportError::MissingAnalysisReport)?;

    let (cddb, cd_text) = analysis.split_once("\n\n").unwrap_or((analysis, ""));
    debug!(
        "cd-info report: {} bytes of CDDB, {} bytes of CD-TEXT",
        cddb.len(),
        cd_text.len()
    );

    Ok(ReportSections { cddb, cd_text })
}

/// `<tool>: Found <N> matches in CDDB` or `<tool>: <N> matches`
fn match_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        // Constant pattern
        Regex::new(r"(?m)^[ \t]*([^:\n]+?):[ \t]*(?:Found[ \t]+)?(\d+)[ \t]+match")
            .expect("CDDB match header pattern is valid")
    })
}

/// Whether the CDDB block reports at least one match from `tool_name`
///
/// A missing header counts as no match.
pub fn has_cddb_match(cddb_text: &str, tool_name: &str) -> bool {
    let matches = match_header()
        .captures_iter(cddb_text)
        .filter(|caps| &caps[1] == tool_name)
        .find_map(|caps| caps[2].parse::<u32>().ok());

    match matches {
        Some(matches) => {
            debug!("{} reports {} CDDB match(es)", tool_name, matches);
            matches > 0
        }
        None => {
            debug!("No CDDB match header from {}", tool_name);
            false
        }
    }
}

/// Parse both metadata blocks of a cd-info report
pub fn parse_report(text: &str, tool_name: &str) -> Result<ReportTags, ReportError> {
    let sections = split_report(text)?;

    let cddb = if has_cddb_match(sections.cddb, tool_name) {
        let parsed = parse_cddb(sections.cddb);
        match &parsed {
            Ok(album) => info!(
                "Found CDDB tags: {} - {}",
                album.album_artist, album.album_title
            ),
            Err(e) => warn!("CDDB block could not be parsed: {}", e),
        }
        Some(parsed)
    } else {
        None
    };

    let cd_text = if sections.cd_text.trim().is_empty() {
        None
    } else {
        let album = parse_cd_text(sections.cd_text);
        info!(
            "Found CD-TEXT tags: {} - {}",
            album.album_artist, album.album_title
        );
        Some(album)
    };

    Ok(ReportTags { cddb, cd_text })
}

/// Decode report bytes, detecting the encoding when they are not UTF-8
///
/// Line endings are normalized to `\n`.
pub fn decode_report(bytes: &[u8]) -> String {
    let content = match std::str::from_utf8(bytes) {
        Ok(content) => content.to_string(),
        Err(_) => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            let encoding = detector.guess(None, true);

            let (decoded, _, had_errors) = encoding.decode(bytes);
            if had_errors {
                warn!(
                    "Decoding errors occurred while reading report as {}",
                    encoding.name()
                );
            }
            decoded.into_owned()
        }
    };

    if content.contains('\r') {
        debug!("Normalizing CRLF line endings in report");
        content.replace("\r\n", "\n")
    } else {
        content
    }
}

/// Read a saved cd-info report from disk
pub fn read_report(path: &Path) -> Result<String, ReportError> {
    let bytes = std::fs::read(path)?;
    Ok(decode_report(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "cd-info version 2.1.0 x86_64-pc-linux-gnu\n\
        CD-ROM Track List (1 - 2)\n\
        \x20 #: MSF       LSN    Type   Green? Copy?\n\
        \x20 1: 00:02:00  000000 audio  false  no\n\
        \x20 2: 03:10:40  014140 audio  false  no\n\
        CD Analysis Report\n\
        CD-DA\n\
        cd-info: Found 1 matches in CDDB\n\
        Artist: 'The Foo'\n\
        Title: 'Bar'\n\
        Number of tracks: 2\n\
        \x20   artist: 'The Foo'\n\
        \x20   title: 'One'\n\
        \x20   artist: 'The Foo'\n\
        \x20   title: 'Two'\n\
        \n\
        CD-TEXT for Disc:\n\
        \tTITLE: Bar\n\
        \tPERFORMER: The Foo\n\
        CD-TEXT for Track  1:\n\
        \tTITLE: One\n\
        CD-TEXT for Track  2:\n\
        \tTITLE: Two\n";

    #[test]
    fn test_split_report() {
        let sections = split_report(REPORT).unwrap();
        assert!(sections.cddb.contains("Found 1 matches"));
        assert!(!sections.cddb.contains("CD-TEXT"));
        assert!(sections.cd_text.starts_with("CD-TEXT for Disc:"));
    }

    #[test]
    fn test_split_report_without_marker() {
        assert!(matches!(
            split_report("cd-info: no disc\n"),
            Err(ReportError::MissingAnalysisReport)
        ));
    }

    #[test]
    fn test_split_report_without_cd_text() {
        let report = "CD Analysis Report\ncd-info: Found 0 matches in CDDB\n";
        let sections = split_report(report).unwrap();
        assert_eq!(sections.cd_text, "");
    }

    #[test]
    fn test_has_cddb_match() {
        assert!(has_cddb_match("cd-info: Found 2 matches in CDDB\n", "cd-info"));
        assert!(has_cddb_match("  cd-info: 1 matches\n", "cd-info"));
        assert!(!has_cddb_match("cd-info: Found 0 matches in CDDB\n", "cd-info"));
        assert!(!has_cddb_match("cd-info: 0 matches\n", "cd-info"));
        assert!(!has_cddb_match("Artist: nobody\n", "cd-info"));
        assert!(!has_cddb_match("cd-info: Found 1 matches in CDDB\n", "img-info"));
    }

    #[test]
    fn test_parse_report_both_sources() {
        let tags = parse_report(REPORT, "cd-info").unwrap();

        let cddb = tags.cddb.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(cddb.album_artist, "The Foo");
        assert_eq!(cddb.track_titles(), vec!["One", "Two"]);

        let cd_text = tags.cd_text.as_ref().unwrap();
        assert_eq!(cd_text.album_title, "Bar");
        assert_eq!(cd_text.track_artists(), vec!["The Foo", "The Foo"]);

        assert_eq!(tags.records().len(), 2);
    }

    #[test]
    fn test_parse_report_keeps_cddb_error() {
        let report = "CD Analysis Report\ncd-info: Found 1 matches in CDDB\nArtist: X\n\n\
            CD-TEXT for Disc:\n\tTITLE: Y\n";
        let tags = parse_report(report, "cd-info").unwrap();

        assert!(matches!(tags.cddb, Some(Err(CddbError::MissingTrackCount))));
        assert_eq!(tags.cd_text.as_ref().unwrap().album_title, "Y");
        assert_eq!(tags.records().len(), 1);
    }

    #[test]
    fn test_parse_report_no_cddb_match_skips_parser() {
        let report = "CD Analysis Report\ncd-info: Found 0 matches in CDDB\n";
        let tags = parse_report(report, "cd-info").unwrap();

        assert!(tags.cddb.is_none());
        assert!(tags.cd_text.is_none());
        assert!(tags.records().is_empty());
    }

    #[test]
    fn test_has_cddb_match_ignores_other_tools() {
        let text = "img-info: Found 3 matches in CDDB\ncd-info: Found 0 matches in CDDB\n";
        assert!(!has_cddb_match(text, "cd-info"));
        assert!(has_cddb_match(text, "img-info"));
        assert!(has_cddb_match("cd.info: 1 matches\n", "cd.info"));
        assert!(!has_cddb_match("cdXinfo: 1 matches\n", "cd.info"));
    }

    #[test]
    fn test_decode_report_crlf_keeps_cd_text() {
        let bytes = REPORT.replace('\n', "\r\n");
        let text = decode_report(bytes.as_bytes());
        assert!(!text.contains('\r'));

        let tags = parse_report(&text, "cd-info").unwrap();
        let cd_text = tags.cd_text.as_ref().unwrap();
        assert_eq!(cd_text.album_title, "Bar");
        assert_eq!(cd_text.track_titles(), vec!["One", "Two"]);
        assert_eq!(tags.records().len(), 2);
    }

    #[test]
    fn test_decode_report_latin1() {
        // "Artist: Björk" in windows-1252
        let bytes = b"Artist: Bj\xf6rk\n";
        assert_eq!(decode_report(bytes), "Artist: Björk\n");
        assert_eq!(decode_report("Títle\n".as_bytes()), "Títle\n");
    }
}
