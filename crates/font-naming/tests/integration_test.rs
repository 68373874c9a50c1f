//! End-to-end runs over font files written to a temporary directory.

use std::{fs, path::PathBuf};

use fontinfo_font_naming::{
    CffSync, Error, FontFile, LANG_TAG_BASE, NAME_TAG, NameRecord, NameTable, PlatformIds,
    RenameRequest, edit_names,
    name_id::{FAMILY_NAME, FULL_NAME, POSTSCRIPT_NAME, PREFERRED_STYLE, STYLE, UNIQUE_ID},
    prepare, rename_postscript, replace_string,
};
use fontinfo_font_ops::CFF_TAG;
use read_fonts::{FontData, FontRead, FontRef, tables::cff::Cff};
use tempfile::TempDir;
use write_fonts::FontBuilder;

const WIN: PlatformIds = PlatformIds::WINDOWS_ENGLISH;
const MAC: PlatformIds = PlatformIds::MAC_ROMAN;

/// Bare CFF with a one-glyph CharStrings INDEX and no custom strings.
const MINIMAL_CFF: &[u8] = &[
    1, 0, 4, 1, // header
    0, 1, 1, 1, 12, b'O', b'l', b'd', b'-', b'R', b'e', b'g', b'u', b'l', b'a', b'r', // Name INDEX
    0, 1, 1, 1, 5, 28, 0, 33, 17, // Top DICT INDEX, CharStrings at 33
    0, 0, // String INDEX
    0, 0, // Global Subr INDEX
    0, 1, 1, 1, 2, 14, // CharStrings INDEX
];

fn build_font(records: Vec<NameRecord>, cff: Option<&[u8]>) -> Vec<u8> {
    let mut builder = FontBuilder::new();
    builder.add_raw(NAME_TAG, NameTable::new(records).to_bytes().unwrap());
    if let Some(cff) = cff {
        builder.add_raw(CFF_TAG, cff.to_vec());
    }
    builder.build()
}

fn old_records(style: &str) -> Vec<NameRecord> {
    let ps_style = style.replace(' ', "");
    vec![
        NameRecord::new(MAC, FAMILY_NAME, "Old Sans"),
        NameRecord::new(MAC, STYLE, style),
        NameRecord::new(WIN, FAMILY_NAME, "Old Sans"),
        NameRecord::new(WIN, STYLE, style),
        NameRecord::new(WIN, UNIQUE_ID, format!("1.000;VEND;OldSans-{ps_style}")),
        NameRecord::new(WIN, FULL_NAME, format!("Old Sans {style}")),
        NameRecord::new(WIN, POSTSCRIPT_NAME, format!("OldSans-{ps_style}")),
    ]
}

fn write_font(dir: &TempDir, file_name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(file_name);
    fs::write(&path, data).unwrap();
    path
}

fn read_names(path: &PathBuf) -> NameTable {
    NameTable::from_data(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn test_rename_every_font() {
    let dir = tempfile::tempdir().unwrap();
    let regular = write_font(&dir, "Old-Regular.ttf", &build_font(old_records("Regular"), None));
    let bold = write_font(&dir, "Old-BoldItalic.ttf", &build_font(old_records("Bold Italic"), None));

    let request = RenameRequest::new("Test Sans");
    let pending = prepare(&request, &[&regular, &bold]).unwrap();
    assert_eq!(pending.len(), 2);
    for rename in pending {
        let outcome = rename.commit().unwrap();
        assert!(matches!(outcome.cff, CffSync::Absent));
    }

    let table = read_names(&regular);
    for ids in [MAC, WIN] {
        assert_eq!(table.get(FAMILY_NAME, ids), Some("Test Sans"));
        assert_eq!(table.get(FULL_NAME, ids), Some("Test Sans Regular"));
        assert_eq!(table.get(POSTSCRIPT_NAME, ids), Some("TestSans-Regular"));
        assert_eq!(table.get(UNIQUE_ID, ids), Some("1.000;VEND;TestSans-Regular"));
    }

    let table = read_names(&bold);
    assert_eq!(table.get(FULL_NAME, WIN), Some("Test Sans Bold Italic"));
    assert_eq!(table.get(POSTSCRIPT_NAME, WIN), Some("TestSans-BoldItalic"));
    assert_eq!(table.get(PREFERRED_STYLE, MAC), Some("Bold Italic"));
}

#[test]
fn test_rename_with_style_windows_compatible() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "Old.ttf", &build_font(old_records("Regular"), None));

    let request = RenameRequest::new("Test Sans")
        .with_style(Some("Condensed Italic".into()))
        .with_windows_compatible(true);
    for rename in prepare(&request, &[&path]).unwrap() {
        assert_eq!(rename.plan().family_name, "Test Sans Condensed");
        rename.commit().unwrap();
    }

    let table = read_names(&path);
    assert_eq!(table.get(FAMILY_NAME, WIN), Some("Test Sans Condensed"));
    assert_eq!(table.get(STYLE, WIN), Some("Italic"));
    assert_eq!(table.get(STYLE, MAC), Some("Italic"));
    assert_eq!(table.get(PREFERRED_STYLE, WIN), Some("Condensed Italic"));
    assert_eq!(table.get(POSTSCRIPT_NAME, WIN), Some("TestSans-CondensedItalic"));
}

#[test]
fn test_empty_style_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let good_data = build_font(old_records("Regular"), None);
    let good = write_font(&dir, "Good.ttf", &good_data);
    let no_style = vec![NameRecord::new(WIN, FAMILY_NAME, "Old Sans")];
    let bad = write_font(&dir, "NoStyle.ttf", &build_font(no_style, None));

    let err = prepare(&RenameRequest::new("Test Sans"), &[&good, &bad]).unwrap_err();
    match err {
        Error::EmptyStyle { path } => assert_eq!(path, bad),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read(&good).unwrap(), good_data);
}

#[test]
fn test_empty_family_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "Old.ttf", &build_font(old_records("Regular"), None));
    let err = prepare(&RenameRequest::new(""), &[&path]).unwrap_err();
    assert!(matches!(err, Error::EmptyFamilyName));
}

#[test]
fn test_unparseable_font_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "junk.ttf", b"not a font");
    let err = prepare(&RenameRequest::new("Test Sans"), &[&path]).unwrap_err();
    assert!(matches!(err, Error::Font(_)));
}

#[test]
fn test_rename_mirrors_names_into_cff() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "Old.otf", &build_font(old_records("Bold"), Some(MINIMAL_CFF)));

    let outcome = prepare(&RenameRequest::new("Test Sans"), &[&path])
        .unwrap()
        .into_iter()
        .map(|rename| rename.commit().unwrap())
        .next()
        .unwrap();
    assert!(matches!(outcome.cff, CffSync::Updated));

    let data = fs::read(&path).unwrap();
    let font = FontRef::new(&data).unwrap();
    let cff_data = font.table_data(CFF_TAG).unwrap();
    let cff = Cff::read(FontData::new(cff_data.as_bytes())).unwrap();
    assert_eq!(cff.names().get(0).unwrap(), b"TestSans-Bold");
    assert_eq!(cff.strings().get(0).unwrap(), b"Test Sans");
    assert_eq!(cff.strings().get(1).unwrap(), b"Test Sans Bold");
    assert_eq!(read_names(&path).get(FULL_NAME, WIN), Some("Test Sans Bold"));
}

#[test]
fn test_cff_failure_keeps_name_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "Old.otf", &build_font(old_records("Bold"), Some(MINIMAL_CFF)));

    let mut pending = prepare(&RenameRequest::new("Œuvre Sans"), &[&path]).unwrap();
    let outcome = pending.remove(0).commit().unwrap();
    assert!(matches!(outcome.cff, CffSync::Failed(_)));

    let data = fs::read(&path).unwrap();
    let font = FontRef::new(&data).unwrap();
    assert_eq!(font.table_data(CFF_TAG).unwrap().as_bytes(), MINIMAL_CFF);
    assert_eq!(read_names(&path).get(FAMILY_NAME, WIN), Some("Œuvre Sans"));
}

#[test]
fn test_edit_names_replace() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "Old.ttf", &build_font(old_records("Regular"), None));

    let changed = edit_names(&FontFile::new(&path), |table| replace_string(table, "Old", "New")).unwrap();
    assert_eq!(changed, 5);

    let table = read_names(&path);
    assert_eq!(table.get(FAMILY_NAME, MAC), Some("New Sans"));
    assert_eq!(table.get(UNIQUE_ID, WIN), Some("1.000;VEND;NewSans-Regular"));
    assert_eq!(table.get(STYLE, WIN), Some("Regular"));
}

#[test]
fn test_edit_names_postscript() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "Old.ttf", &build_font(old_records("Regular"), None));

    let changed =
        edit_names(&FontFile::new(&path), |table| rename_postscript(table, "Fresh-Regular")).unwrap();
    assert_eq!(changed, 1);
    assert_eq!(read_names(&path).get(POSTSCRIPT_NAME, WIN), Some("Fresh-Regular"));
}

#[test]
fn test_undecodable_records_and_lang_tags_survive_edits() {
    const MAC_JAPANESE: PlatformIds = PlatformIds::new(1, 1, 11);
    const SHIFT_JIS: &[u8] = &[0x83, 0x65, 0x83, 0x58, 0x83, 0x67];

    let mut records = old_records("Regular");
    records.push(NameRecord::undecodable(MAC_JAPANESE, FAMILY_NAME, SHIFT_JIS));
    records.push(NameRecord::undecodable(MAC_JAPANESE, POSTSCRIPT_NAME, b"OldSans-Regular".as_slice()));
    records.push(NameRecord::new(PlatformIds::new(3, 1, LANG_TAG_BASE), FAMILY_NAME, "Old Sans"));
    let table = NameTable::new(records).with_lang_tags(vec!["en-Latn".into()]);
    let mut builder = FontBuilder::new();
    builder.add_raw(NAME_TAG, table.to_bytes().unwrap());

    let dir = tempfile::tempdir().unwrap();
    let path = write_font(&dir, "Old.ttf", &builder.build());

    for rename in prepare(&RenameRequest::new("Test Sans"), &[&path]).unwrap() {
        rename.commit().unwrap();
    }
    let file = FontFile::new(&path);
    edit_names(&file, |table| replace_string(table, "Test", "Best")).unwrap();
    let changed = edit_names(&file, |table| rename_postscript(table, "Best-Regular")).unwrap();
    assert_eq!(changed, 2);

    let table = read_names(&path);
    let raw = |name_id: u16| table.records().iter().find(|r| r.key() == (1, 1, 11, name_id)).unwrap();
    assert_eq!(raw(FAMILY_NAME).undecoded(), Some(SHIFT_JIS));
    assert_eq!(raw(POSTSCRIPT_NAME).undecoded(), Some(b"OldSans-Regular".as_slice()));
    assert_eq!(table.lang_tags(), ["en-Latn"]);
    assert_eq!(table.get(FAMILY_NAME, PlatformIds::new(3, 1, LANG_TAG_BASE)), Some("Old Sans"));
    assert_eq!(table.get(FAMILY_NAME, WIN), Some("Best Sans"));
    assert_eq!(table.get(POSTSCRIPT_NAME, MAC), Some("Best-Regular"));
}
