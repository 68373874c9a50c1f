//! In-memory model of the `name` table.

use std::collections::HashMap;

use anyhow::{Context, Result, bail, ensure};
use log::{debug, warn};
use read_fonts::{
    FontRef, Offset, TableProvider,
    tables::name::{Encoding, MacRomanMapping},
    types::Tag,
};

pub const NAME_TAG: Tag = Tag::new(b"name");

/// Language IDs at or above this refer to the table's language tags.
pub const LANG_TAG_BASE: u16 = 0x8000;

const HEADER_LEN: usize = 6;
const RECORD_LEN: usize = 12;
const LANG_TAG_RECORD_LEN: usize = 4;

/// Platform, encoding and language IDs shared by a group of name records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformIds {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
}

impl PlatformIds {
    /// Windows, Unicode BMP, English (United States).
    pub const WINDOWS_ENGLISH: Self = Self::new(3, 1, 1033);
    /// Macintosh, Roman, English.
    pub const MAC_ROMAN: Self = Self::new(1, 0, 0);

    pub const fn new(platform_id: u16, encoding_id: u16, language_id: u16) -> Self {
        Self { platform_id, encoding_id, language_id }
    }
}

/// A single name record.
///
/// Strings in an encoding other than UTF-16BE or Mac Roman are not decoded.
/// Their `value` is empty and their bytes are kept as read, see
/// [`NameRecord::undecoded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: String,
    undecoded: Option<Vec<u8>>,
}

impl NameRecord {
    pub fn new(ids: PlatformIds, name_id: u16, value: impl Into<String>) -> Self {
        Self {
            platform_id: ids.platform_id,
            encoding_id: ids.encoding_id,
            language_id: ids.language_id,
            name_id,
            value: value.into(),
            undecoded: None,
        }
    }

    /// A record whose string is kept as raw bytes.
    pub fn undecodable(ids: PlatformIds, name_id: u16, bytes: impl Into<Vec<u8>>) -> Self {
        Self { undecoded: Some(bytes.into()), ..Self::new(ids, name_id, "") }
    }

    pub fn platform(&self) -> PlatformIds {
        PlatformIds::new(self.platform_id, self.encoding_id, self.language_id)
    }

    /// `(platform, encoding, language, name)`, the record's identity.
    pub fn key(&self) -> (u16, u16, u16, u16) {
        (self.platform_id, self.encoding_id, self.language_id, self.name_id)
    }

    /// The stored bytes of a string that could not be decoded.
    pub fn undecoded(&self) -> Option<&[u8]> {
        self.undecoded.as_deref()
    }

    fn matches(&self, name_id: u16, ids: PlatformIds) -> bool {
        self.name_id == name_id && self.platform() == ids
    }

    fn overwrite(&mut self, value: String) {
        self.value = value;
        self.undecoded = None;
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let (p, e, l, n) = self.key();
        if let Some(bytes) = &self.undecoded {
            ensure!(
                self.value.is_empty(),
                "name record {p}/{e}/{l}/{n} uses an encoding that cannot be written"
            );
            return Ok(bytes.clone());
        }

        match Encoding::new(p, e) {
            Encoding::Utf16Be => Ok(utf16_be(&self.value)),
            Encoding::MacRoman => self
                .value
                .chars()
                .map(|c| {
                    MacRomanMapping.encode(c).with_context(|| {
                        format!("'{c}' cannot be encoded as Mac Roman in name record {p}/{e}/{l}/{n}")
                    })
                })
                .collect(),
            Encoding::Unknown if self.value.is_empty() => Ok(Vec::new()),
            Encoding::Unknown => {
                bail!("name record {p}/{e}/{l}/{n} uses an encoding that cannot be written")
            }
        }
    }
}

fn utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// Name records of one font, in file order, and its language tags.
///
/// Keys are not required to be unique. Lookups return the first match and
/// [`NameTable::set`] overwrites the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    records: Vec<NameRecord>,
    lang_tags: Vec<String>,
}

impl NameTable {
    pub fn new(records: Vec<NameRecord>) -> Self {
        Self { records, lang_tags: Vec::new() }
    }

    /// Attach language tags, which make this a version 1 table.
    pub fn with_lang_tags(mut self, lang_tags: Vec<String>) -> Self {
        self.lang_tags = lang_tags;
        self
    }

    /// Decode the `name` table of `font`.
    ///
    /// Records whose string lies outside the string storage are skipped.
    pub fn from_font(font: &FontRef) -> Result<Self> {
        let name = font.name().context("Failed to read name table")?;
        let storage = name.string_data();
        let mut records = Vec::new();

        for record in name.name_record() {
            let ids = PlatformIds::new(
                record.platform_id(),
                record.encoding_id(),
                record.language_id(),
            );
            let name_id = record.name_id().to_u16();

            if Encoding::new(ids.platform_id, ids.encoding_id) == Encoding::Unknown {
                let start = record.string_offset().to_usize();
                let end = start + record.length() as usize;
                match storage.as_bytes().get(start..end) {
                    Some(bytes) => {
                        debug!(
                            "keeping {} undecoded bytes of name record {}/{}/{}/{name_id}",
                            bytes.len(),
                            ids.platform_id,
                            ids.encoding_id,
                            ids.language_id
                        );
                        records.push(NameRecord::undecodable(ids, name_id, bytes));
                    }
                    None => warn!(
                        "skipping name record {}/{}/{}/{name_id}: string out of bounds",
                        ids.platform_id, ids.encoding_id, ids.language_id
                    ),
                }
                continue;
            }

            match record.string(storage) {
                Ok(s) => records.push(NameRecord::new(ids, name_id, s.chars().collect::<String>())),
                Err(e) => warn!(
                    "skipping name record {}/{}/{}/{name_id}: {e}",
                    ids.platform_id, ids.encoding_id, ids.language_id
                ),
            }
        }

        let lang_tags = name
            .lang_tag_record()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                tag.lang_tag(storage)
                    .map(|s| s.chars().collect::<String>())
                    .with_context(|| format!("Failed to read language tag {i}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records, lang_tags })
    }

    /// Parse `data` as a font and decode its `name` table.
    pub fn from_data(data: &[u8]) -> Result<Self> {
        let font = FontRef::new(data).context("Failed to parse font")?;
        Self::from_font(&font)
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> std::slice::IterMut<'_, NameRecord> {
        self.records.iter_mut()
    }

    /// Language tags, referenced by language IDs from [`LANG_TAG_BASE`].
    pub fn lang_tags(&self) -> &[String] {
        &self.lang_tags
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of the first record with this exact key.
    pub fn get(&self, name_id: u16, ids: PlatformIds) -> Option<&str> {
        self.records.iter().find(|r| r.matches(name_id, ids)).map(|r| r.value.as_str())
    }

    /// Value for `name_id`, preferring Windows English over Mac Roman.
    pub fn find(&self, name_id: u16) -> Option<&str> {
        [PlatformIds::WINDOWS_ENGLISH, PlatformIds::MAC_ROMAN]
            .into_iter()
            .find_map(|ids| self.get(name_id, ids))
    }

    /// Overwrite the first record with this key, or append a new one.
    pub fn set(&mut self, name_id: u16, ids: PlatformIds, value: impl Into<String>) {
        let value = value.into();
        debug!(
            "set {}/{}/{}/{name_id} = {value:?}",
            ids.platform_id, ids.encoding_id, ids.language_id
        );
        match self.records.iter_mut().find(|r| r.matches(name_id, ids)) {
            Some(record) => record.overwrite(value),
            None => self.records.push(NameRecord::new(ids, name_id, value)),
        }
    }

    /// Overwrite every decoded record with `name_id`, on any platform or language.
    ///
    /// Records kept as raw bytes are left alone. Returns the number of
    /// records written.
    pub fn set_all(&mut self, name_id: u16, value: &str) -> usize {
        let mut count = 0;
        for record in self.records.iter_mut().filter(|r| r.name_id == name_id) {
            if record.undecoded.is_some() {
                debug!("leaving undecoded name record {:?} as is", record.key());
                continue;
            }
            record.value = value.to_owned();
            count += 1;
        }
        count
    }

    /// Serialise as a `name` table, records sorted by key.
    ///
    /// Writes version 1 when the table has language tags. Identical strings
    /// share storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut records: Vec<&NameRecord> = self.records.iter().collect();
        records.sort_by_key(|r| r.key());

        let version: u16 = if self.lang_tags.is_empty() { 0 } else { 1 };
        let mut storage_offset = HEADER_LEN + RECORD_LEN * records.len();
        if version == 1 {
            storage_offset += 2 + LANG_TAG_RECORD_LEN * self.lang_tags.len();
        }

        let mut storage = Storage::default();
        let mut out = Vec::with_capacity(storage_offset);
        out.extend_from_slice(&version.to_be_bytes());
        out.extend_from_slice(&u16_len(records.len(), "name record count")?.to_be_bytes());
        out.extend_from_slice(&u16_len(storage_offset, "name storage offset")?.to_be_bytes());

        for record in records {
            let (length, offset) = storage.add(record.encode()?)?;
            for field in [
                record.platform_id,
                record.encoding_id,
                record.language_id,
                record.name_id,
                length,
                offset,
            ] {
                out.extend_from_slice(&field.to_be_bytes());
            }
        }

        if version == 1 {
            out.extend_from_slice(&u16_len(self.lang_tags.len(), "language tag count")?.to_be_bytes());
            for tag in &self.lang_tags {
                let (length, offset) = storage.add(utf16_be(tag))?;
                out.extend_from_slice(&length.to_be_bytes());
                out.extend_from_slice(&offset.to_be_bytes());
            }
        }

        out.extend_from_slice(&storage.data);
        Ok(out)
    }
}

/// String storage of a `name` table.
#[derive(Default)]
struct Storage {
    data: Vec<u8>,
    offsets: HashMap<Vec<u8>, u16>,
}

impl Storage {
    /// Store `bytes` and return their `(length, offset)`.
    fn add(&mut self, bytes: Vec<u8>) -> Result<(u16, u16)> {
        let length = u16_len(bytes.len(), "name string length")?;
        if let Some(&offset) = self.offsets.get(&bytes) {
            return Ok((length, offset));
        }
        let offset = u16_len(self.data.len(), "name string offset")?;
        self.data.extend_from_slice(&bytes);
        self.offsets.insert(bytes, offset);
        Ok((length, offset))
    }
}

fn u16_len(value: usize, what: &str) -> Result<u16> {
    u16::try_from(value).with_context(|| format!("{what} {value} does not fit in 16 bits"))
}
