//! cd-info report parsing
//!
//! cd-info's analysis report carries up to two independent tag sources:
//! a CDDB match and the disc's CD-TEXT. Both are parsed into
//! [`AlbumRecord`](crate::album::AlbumRecord)s:
//!
//! - **extract**: labelled line lookup and the cursor threaded through it
//! - **cddb**: fixed-count CDDB block, fails on a bad track count
//! - **cd_text**: open-ended CD-TEXT sections, never fails
//! - **report**: splits a whole report and runs the parsers

pub mod cd_text;
pub mod cddb;
pub mod extract;
pub mod report;

pub use cd_text::{parse_cd_text, CD_TEXT_UNKNOWN, CD_TEXT_UNTITLED};
pub use cddb::{parse_cddb, CddbError, MAX_CDDB_TRACKS};
pub use extract::{find_field, Field, TextCursor};
pub use report::{
    decode_report, has_cddb_match, parse_report, read_report, split_report, ReportError,
    ReportSections, ReportTags,
};
