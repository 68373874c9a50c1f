//! Raw and friendly renderings of a name table.

use std::{
    borrow::Cow,
    collections::HashSet,
    io::{self, Write},
    ops::RangeInclusive,
};

use fontinfo_font_ops::{NameRecord, NameTable};
use fontinfo_text_layout::{Layout, TRUNCATE_WIDTH, WrapOptions};

use crate::name_id::label;

/// Width of the label column in the friendly view.
pub const LABEL_WIDTH: usize = 23;

/// nameIDs shown first in the friendly view, in this order.
pub const PRIORITY_NAME_IDS: [u16; 14] = [1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12, 16, 17, 18];

const ENGLISH: u16 = 1033;
/// Mac Roman English, shown in the raw view only.
const MAC_ENGLISH: u16 = 0;
const LISTED_NAME_IDS: RangeInclusive<u16> = 0..=24;

const RULE: &str =
    "-------------------------------------------------------------------------------------------------";

/// Renders name tables as text.
#[derive(Debug, Clone, Copy)]
pub struct Printer<'a> {
    layout: Layout<'a>,
}

impl<'a> Printer<'a> {
    pub fn new(layout: Layout<'a>) -> Self {
        Self { layout }
    }

    /// Print every record as a row of IDs followed by its value.
    ///
    /// With `shorten`, values are truncated to fit one line; otherwise
    /// carriage returns become line feeds.
    pub fn write_raw(&self, out: &mut impl Write, table: &NameTable, shorten: bool) -> io::Result<()> {
        writeln!(out, "{RULE}")?;
        writeln!(out, "platformID  platEncID   langID      nameID      string")?;
        writeln!(out, "{RULE}")?;

        for record in table.records() {
            let value = displayed(record);
            let value = if shorten {
                self.layout.truncate(&value, TRUNCATE_WIDTH).to_owned()
            } else {
                value.replace('\r', "\n")
            };
            writeln!(
                out,
                "{:<10}  {:<10}  {:<10}  {:<10}  {value}",
                record.platform_id, record.encoding_id, record.language_id, record.name_id
            )?;
        }
        Ok(())
    }

    /// Print labelled, wrapped values of the English and localized records.
    pub fn write_friendly(&self, out: &mut impl Write, table: &NameTable) -> io::Result<()> {
        for record in friendly_order(table) {
            let value = displayed(record);
            let value = self.layout.wrap(&value, WrapOptions::DEFAULT);
            writeln!(out, "{:<LABEL_WIDTH$}{value}", label(record.name_id))?;
        }
        Ok(())
    }

    /// File name, shortened raw table, blank line, friendly table.
    pub fn write_dump(&self, out: &mut impl Write, title: &str, table: &NameTable) -> io::Result<()> {
        writeln!(out, "{title}")?;
        self.write_raw(out, table, true)?;
        writeln!(out)?;
        self.write_friendly(out, table)
    }
}

/// The record's value, or a placeholder for bytes that were not decoded.
fn displayed(record: &NameRecord) -> Cow<'_, str> {
    match record.undecoded() {
        Some(bytes) => Cow::Owned(format!("<undecodable {} bytes>", bytes.len())),
        None => Cow::Borrowed(&record.value),
    }
}

/// Records shown in the friendly view, in display order.
///
/// 1. English records with a priority nameID, in priority order.
/// 2. Other English records by nameID, skipping values already shown.
/// 3. Localized records with a priority nameID, by nameID.
/// 4. Other localized records, by nameID.
pub fn friendly_order(table: &NameTable) -> Vec<&NameRecord> {
    let records = table.records();
    let is_priority = |id: u16| PRIORITY_NAME_IDS.contains(&id);
    let is_english = |r: &NameRecord| r.language_id == ENGLISH;
    let is_localized = |r: &NameRecord| r.language_id != MAC_ENGLISH && r.language_id != ENGLISH;

    let mut rows = Vec::new();
    let mut shown = HashSet::new();

    for id in PRIORITY_NAME_IDS {
        for record in with_id(records, id, is_english) {
            shown.insert(record.value.as_str());
            rows.push(record);
        }
    }
    for id in LISTED_NAME_IDS.filter(|&id| !is_priority(id)) {
        rows.extend(
            with_id(records, id, is_english).filter(|r| !shown.contains(r.value.as_str())),
        );
    }
    for id in LISTED_NAME_IDS.filter(|&id| is_priority(id)) {
        rows.extend(with_id(records, id, is_localized));
    }
    for id in LISTED_NAME_IDS.filter(|&id| !is_priority(id)) {
        rows.extend(with_id(records, id, is_localized));
    }
    rows
}

fn with_id(
    records: &[NameRecord],
    name_id: u16,
    pick: impl Fn(&NameRecord) -> bool,
) -> impl Iterator<Item = &NameRecord> {
    records.iter().filter(move |r| r.name_id == name_id && pick(*r))
}

#[cfg(test)]
mod tests {
    use fontinfo_font_ops::PlatformIds;

    use super::*;

    const JAPANESE: PlatformIds = PlatformIds::new(3, 1, 1041);

    fn render(f: impl FnOnce(&Printer, &mut Vec<u8>) -> io::Result<()>) -> String {
        let printer = Printer::new(Layout::uniform());
        let mut out = Vec::new();
        f(&printer, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn keys(rows: &[&NameRecord]) -> Vec<(u16, u16)> {
        rows.iter().map(|r| (r.language_id, r.name_id)).collect()
    }

    #[test]
    fn test_priority_order_then_localized() {
        let table = NameTable::new(vec![
            NameRecord::new(JAPANESE, 1, "日本語ファミリー"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 4, "Test Sans Bold"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 1, "Test Sans"),
        ]);
        let rows = friendly_order(&table);
        assert_eq!(keys(&rows), vec![(1033, 1), (1033, 4), (1041, 1)]);
    }

    #[test]
    fn test_priority_list_order_not_numeric() {
        let table = NameTable::new(vec![
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 16, "Test Sans"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 8, "Maker"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 0, "Copyright"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 13, "License"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 2, "Bold"),
        ]);
        let rows = friendly_order(&table);
        let ids: Vec<_> = rows.iter().map(|r| r.name_id).collect();
        assert_eq!(ids, vec![2, 8, 16, 0, 13]);
    }

    #[test]
    fn test_english_duplicates_skipped() {
        let table = NameTable::new(vec![
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 1, "Test Sans"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 21, "Test Sans"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 22, "Condensed"),
            NameRecord::new(JAPANESE, 1, "Test Sans"),
        ]);
        let rows = friendly_order(&table);
        assert_eq!(keys(&rows), vec![(1033, 1), (1033, 22), (1041, 1)]);
    }

    #[test]
    fn test_mac_and_out_of_range_records_hidden() {
        let table = NameTable::new(vec![
            NameRecord::new(PlatformIds::MAC_ROMAN, 1, "Mac Family"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 256, "Axis"),
            NameRecord::new(JAPANESE, 25, "Out of range"),
            NameRecord::new(JAPANESE, 19, "サンプル"),
        ]);
        let rows = friendly_order(&table);
        assert_eq!(keys(&rows), vec![(1041, 19)]);
    }

    #[test]
    fn test_friendly_lines() {
        let table = NameTable::new(vec![
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 1, "Test Sans"),
            NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 23, "Extra"),
        ]);
        let text = render(|p, out| p.write_friendly(out, &table));
        assert_eq!(text, format!("{:<23}Test Sans\n{:<23}Extra\n", "Family name", "nameID=23"));
    }

    #[test]
    fn test_friendly_wraps_long_values() {
        let long = "word ".repeat(30);
        let table =
            NameTable::new(vec![NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 10, long.trim())]);
        let text = render(|p, out| p.write_friendly(out, &table));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("Description            word"));
        assert!(lines[1..].iter().all(|l| l.starts_with(&" ".repeat(LABEL_WIDTH))));
    }

    #[test]
    fn test_raw_rows() {
        let table = NameTable::new(vec![NameRecord::new(
            PlatformIds::WINDOWS_ENGLISH,
            0,
            "Line one\rLine two",
        )]);
        let text = render(|p, out| p.write_raw(out, &table, false));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[1], "platformID  platEncID   langID      nameID      string");
        assert_eq!(lines[2], RULE);
        assert_eq!(lines[3], "3           1           1033        0           Line one");
        assert_eq!(lines[4], "Line two");
    }

    #[test]
    fn test_raw_rows_shortened() {
        let long = "x".repeat(80);
        let table = NameTable::new(vec![NameRecord::new(PlatformIds::MAC_ROMAN, 0, long)]);
        let text = render(|p, out| p.write_raw(out, &table, true));
        let row = text.lines().nth(3).unwrap();
        assert_eq!(row, format!("1           0           0           0           {}", "x".repeat(49)));
    }

    #[test]
    fn test_undecodable_placeholder() {
        let table = NameTable::new(vec![NameRecord::undecodable(
            PlatformIds::new(1, 1, 11),
            1,
            [0x83, 0x65, 0x83, 0x58],
        )]);
        let raw = render(|p, out| p.write_raw(out, &table, true));
        assert_eq!(
            raw.lines().nth(3).unwrap(),
            "1           1           11          1           <undecodable 4 bytes>"
        );
        let friendly = render(|p, out| p.write_friendly(out, &table));
        assert_eq!(friendly, format!("{:<23}<undecodable 4 bytes>\n", "Family name"));
    }

    #[test]
    fn test_dump_layout() {
        let table =
            NameTable::new(vec![NameRecord::new(PlatformIds::WINDOWS_ENGLISH, 2, "Regular")]);
        let text = render(|p, out| p.write_dump(out, "Test-Regular.otf", &table));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Test-Regular.otf");
        assert_eq!(lines[1], RULE);
        assert_eq!(lines[4], "3           1           1033        2           Regular");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], format!("{:<23}Regular", "Style"));
    }
}
