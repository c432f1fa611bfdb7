use disctag::cd_info::{parse_report, read_report, CddbError, ReportError, CD_TEXT_UNKNOWN};
use disctag::selection::{DisplayState, MenuOption, MenuOutcome, TagMenu};
use disctag::TagSource;
use std::io::Write;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_various_artists_report() {
    let text = read_report(&fixture("various_artists.cd-info.txt")).unwrap();
    let tags = parse_report(&text, "cd-info").unwrap();

    let cddb = tags.cddb.as_ref().unwrap().as_ref().unwrap();
    assert_eq!(cddb.source(), TagSource::Cddb);
    assert_eq!(cddb.album_artist, "Various");
    assert_eq!(cddb.album_title, "Late Night Sessions");
    assert_eq!(cddb.track_count(), 4);
    assert_eq!(
        cddb.track_titles(),
        vec![
            "Nights Introlude",
            "High Noon",
            "Shaolin Satellite",
            "Les Nuits"
        ]
    );
    assert_eq!(
        cddb.track_artists(),
        vec![
            "Nightmares on Wax",
            "Kruder & Dorfmeister",
            "Thievery Corporation",
            "Nightmares on Wax"
        ]
    );
    assert!(cddb.has_multiple_artists());

    let cd_text = tags.cd_text.as_ref().unwrap();
    assert_eq!(cd_text.source(), TagSource::CdText);
    assert_eq!(cd_text.album_title, "Late Night Sessions");
    assert_eq!(cd_text.album_artist, CD_TEXT_UNKNOWN);
    assert_eq!(cd_text.track_count(), 4);
    assert_eq!(cd_text.track_titles()[2], "TRACK 03");
    assert!(cd_text.has_multiple_artists());

    assert_eq!(tags.records().len(), 2);
}

#[test]
fn test_report_without_cddb_match() {
    let text = read_report(&fixture("no_cddb_match.cd-info.txt")).unwrap();
    let tags = parse_report(&text, "cd-info").unwrap();

    assert!(tags.cddb.is_none());

    let cd_text = tags.cd_text.unwrap();
    assert_eq!(cd_text.album_title, "Field Recordings");
    // Disc performer recovered from the unanimous track performers
    assert_eq!(cd_text.album_artist, "Ann Example");
    assert_eq!(cd_text.track_titles(), vec!["Harbour", "Rain", "TRACK 03"]);
    assert!(!cd_text.has_multiple_artists());
}

#[test]
fn test_report_with_truncated_cddb_block() {
    let text = read_report(&fixture("broken_cddb.cd-info.txt")).unwrap();
    let tags = parse_report(&text, "cd-info").unwrap();

    assert!(matches!(tags.cddb, Some(Err(CddbError::MissingTrackCount))));
    assert!(tags.cd_text.is_none());
    assert!(tags.records().is_empty());
}

#[test]
fn test_tool_name_must_match_header() {
    let text = read_report(&fixture("various_artists.cd-info.txt")).unwrap();
    let tags = parse_report(&text, "img-info").unwrap();

    assert!(tags.cddb.is_none());
    assert!(tags.cd_text.is_some());
}

#[test]
fn test_read_report_latin1_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        b"CD Analysis Report\n\
          cd-info: Found 0 matches in CDDB\n\
          \n\
          CD-TEXT for Disc:\n\
          \tTITLE: Homogenic\n\
          \tPERFORMER: Bj\xf6rk\n\
          CD-TEXT for Track  1:\n\
          \tTITLE: Hunter\n",
    )
    .unwrap();
    file.flush().unwrap();

    let text = read_report(file.path()).unwrap();
    let tags = parse_report(&text, "cd-info").unwrap();
    let cd_text = tags.cd_text.unwrap();

    assert_eq!(cd_text.album_artist, "Björk");
    assert_eq!(cd_text.track_artists(), vec!["Björk"]);
}

#[test]
fn test_read_report_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_report(&dir.path().join("absent.txt"));
    assert!(matches!(result, Err(ReportError::Io(_))));
}

#[test]
fn test_report_without_analysis_section() {
    let result = parse_report("cd-info: no CD in drive\n", "cd-info");
    assert!(matches!(result, Err(ReportError::MissingAnalysisReport)));
}

#[test]
fn test_menu_over_parsed_report() {
    let text = read_report(&fixture("various_artists.cd-info.txt")).unwrap();
    let tags = parse_report(&text, "cd-info").unwrap();
    let cddb = tags.cddb.and_then(|r| r.ok());

    let mut menu = TagMenu::new(cddb, tags.cd_text);
    assert_eq!(menu.state(), DisplayState::ShowingCddb);

    assert_eq!(
        menu.handle(MenuOption::Switch),
        MenuOutcome::Continue(DisplayState::ShowingCdText)
    );
    menu.handle(MenuOption::ApplyArtist);

    match menu.handle(MenuOption::Use) {
        MenuOutcome::Selected(mut record) => {
            assert_eq!(record.source(), TagSource::CdText);
            assert!(!record.has_multiple_artists());
            assert!(record.track_artists().iter().all(|a| *a == CD_TEXT_UNKNOWN));

            record.clean();
            assert_eq!(record.album_title, "Late Night Sessions");
        }
        other => panic!("expected selection, got {:?}", other),
    }
}
