//! Rewriting the naming fields of a `CFF ` table.
//!
//! `write-fonts` has no CFF support, so the table is patched at the byte
//! level: the Name INDEX is replaced, new strings are appended to the String
//! INDEX and the Top DICT is re-encoded. Everything from the Global Subr INDEX
//! onwards is copied verbatim and the absolute offsets in the Top DICT are
//! shifted by the size difference of the rewritten prefix.
//!
//! CID-keyed fonts are rejected: their FDArray holds further absolute offsets.

use anyhow::{Context, Result, anyhow, bail, ensure};
use log::debug;
use read_fonts::{FontData, FontRead, tables::cff::Cff, types::Tag};

pub const CFF_TAG: Tag = Tag::new(b"CFF ");

/// Number of predefined strings; custom string IDs start here.
const STANDARD_STRING_COUNT: usize = 391;

const ESCAPE: u8 = 12;

const FULL_NAME: u16 = 2;
const FAMILY_NAME: u16 = 3;
const CHARSET: u16 = 15;
const ENCODING: u16 = 16;
const CHAR_STRINGS: u16 = 17;
const PRIVATE: u16 = 18;
const ROS: u16 = escaped(30);
const FD_ARRAY: u16 = escaped(36);
const FD_SELECT: u16 = escaped(37);

const fn escaped(op: u8) -> u16 {
    ((ESCAPE as u16) << 8) | op as u16
}

/// Names mirrored into a CFF font.
#[derive(Debug, Clone, Copy)]
pub struct CffNames<'a> {
    /// Top DICT `FamilyName`.
    pub family_name: &'a str,
    /// Top DICT `FullName`.
    pub full_name: &'a str,
    /// Sole entry of the Name INDEX (the PostScript name).
    pub font_name: &'a str,
}

/// Return a copy of the `CFF ` table `data` carrying `names`.
pub fn rename_cff(data: &[u8], names: &CffNames) -> Result<Vec<u8>> {
    let cff = Cff::read(FontData::new(data)).context("Failed to parse CFF table")?;

    let font_count = cff.names().count();
    ensure!(font_count == 1, "expected one font in CFF table, found {font_count}");
    ensure!(cff.top_dicts().count() == 1, "expected one Top DICT in CFF table");

    let hdr_size = cff.header().hdr_size() as usize;
    let strings = cff.strings();
    let old_prefix_len = hdr_size
        + cff.names().size_in_bytes()?
        + cff.top_dicts().size_in_bytes()?
        + strings.size_in_bytes()?;
    ensure!(old_prefix_len <= data.len(), "CFF INDEX data out of bounds");

    let top_dict = cff.top_dicts().get(0).map_err(|e| anyhow!("Failed to read Top DICT: {e}"))?;
    let entries = parse_dict(top_dict)?;
    if entries.iter().any(|e| matches!(e.operator, ROS | FD_ARRAY | FD_SELECT)) {
        bail!("CID-keyed CFF fonts are not supported");
    }

    let mut string_data = (0..strings.count() as usize)
        .map(|i| {
            strings.get(i).map(<[u8]>::to_vec).map_err(|e| anyhow!("Failed to read string {i}: {e}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let family_sid = sid(STANDARD_STRING_COUNT + string_data.len())?;
    string_data.push(latin1(names.family_name)?);
    let full_name_sid = sid(STANDARD_STRING_COUNT + string_data.len())?;
    string_data.push(latin1(names.full_name)?);
    let font_name = latin1(names.font_name)?;

    let header = &data[..hdr_size];
    let names_index = write_index(&[font_name.as_slice()])?;
    let strings_index = write_index(&string_data)?;

    // Replaced operands are always five bytes long, so the Top DICT size does
    // not depend on how far the offsets move.
    let probe = write_top_dict(&entries, family_sid, full_name_sid, 0)?;
    let top_index_len = write_index(&[probe.as_slice()])?.len();
    let new_prefix_len = header.len() + names_index.len() + top_index_len + strings_index.len();
    let delta = new_prefix_len as i64 - old_prefix_len as i64;

    let top_dict = write_top_dict(&entries, family_sid, full_name_sid, delta)?;
    let top_index = write_index(&[top_dict.as_slice()])?;
    debug_assert_eq!(top_index.len(), top_index_len);
    debug!("rewrote CFF names, offsets shifted by {delta} bytes");

    let mut out = Vec::with_capacity(data.len() + delta.max(0) as usize);
    out.extend_from_slice(header);
    out.extend_from_slice(&names_index);
    out.extend_from_slice(&top_index);
    out.extend_from_slice(&strings_index);
    out.extend_from_slice(&data[old_prefix_len..]);
    Ok(out)
}

fn sid(index: usize) -> Result<i32> {
    ensure!(index <= u16::MAX as usize, "too many strings in CFF table");
    Ok(index as i32)
}

fn latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| anyhow!("'{c}' cannot be stored in a CFF string")))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Operand<'a> {
    raw: &'a [u8],
    /// Integer value; `None` for real numbers.
    value: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DictEntry<'a> {
    operands: Vec<Operand<'a>>,
    operator: u16,
}

fn parse_dict(data: &[u8]) -> Result<Vec<DictEntry<'_>>> {
    let mut entries = Vec::new();
    let mut operands = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let b0 = data[pos];
        let (len, value) = match b0 {
            ESCAPE => {
                let b1 = *data.get(pos + 1).context("truncated DICT operator")?;
                entries.push(DictEntry { operands: std::mem::take(&mut operands), operator: escaped(b1) });
                pos += 2;
                continue;
            }
            0..=21 => {
                entries.push(DictEntry { operands: std::mem::take(&mut operands), operator: b0 as u16 });
                pos += 1;
                continue;
            }
            28 => {
                let b = data.get(pos + 1..pos + 3).context("truncated DICT operand")?;
                (3, Some(i16::from_be_bytes([b[0], b[1]]) as i32))
            }
            29 => {
                let b = data.get(pos + 1..pos + 5).context("truncated DICT operand")?;
                (5, Some(i32::from_be_bytes([b[0], b[1], b[2], b[3]])))
            }
            30 => (real_len(&data[pos..])?, None),
            32..=246 => (1, Some(b0 as i32 - 139)),
            247..=254 => {
                let b1 = *data.get(pos + 1).context("truncated DICT operand")? as i32;
                let magnitude = (b0 as i32 - if b0 < 251 { 247 } else { 251 }) * 256 + b1 + 108;
                (2, Some(if b0 < 251 { magnitude } else { -magnitude }))
            }
            _ => bail!("invalid DICT byte {b0}"),
        };
        operands.push(Operand { raw: &data[pos..pos + len], value });
        pos += len;
    }

    ensure!(operands.is_empty(), "DICT ends with operands but no operator");
    Ok(entries)
}

/// Length of a BCD real operand starting at `data[0] == 30`.
fn real_len(data: &[u8]) -> Result<usize> {
    for (i, b) in data.iter().enumerate().skip(1) {
        if b >> 4 == 0xf || b & 0xf == 0xf {
            return Ok(i + 1);
        }
    }
    bail!("unterminated real number in DICT")
}

fn encode_int(value: i32) -> [u8; 5] {
    let b = value.to_be_bytes();
    [29, b[0], b[1], b[2], b[3]]
}

fn push_operator(out: &mut Vec<u8>, operator: u16) {
    if operator >> 8 == ESCAPE as u16 {
        out.extend_from_slice(&[ESCAPE, operator as u8]);
    } else {
        out.push(operator as u8);
    }
}

fn shift(operand: &Operand, delta: i64) -> Result<[u8; 5]> {
    let value = operand.value.context("real number used as an offset")?;
    let shifted = i32::try_from(value as i64 + delta).context("shifted offset out of range")?;
    ensure!(shifted >= 0, "shifted offset is negative");
    Ok(encode_int(shifted))
}

fn write_top_dict(
    entries: &[DictEntry],
    family_sid: i32,
    full_name_sid: i32,
    delta: i64,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut wrote_family = false;
    let mut wrote_full_name = false;

    for entry in entries {
        // charset 0..=2 and Encoding 0..=1 select predefined tables, not offsets
        let shifted_operand = match entry.operator {
            CHARSET => entry.operands.first().filter(|o| o.value.is_none_or(|v| v > 2)).map(|_| 0),
            ENCODING => entry.operands.first().filter(|o| o.value.is_none_or(|v| v > 1)).map(|_| 0),
            CHAR_STRINGS => Some(0),
            PRIVATE => Some(1),
            _ => None,
        };

        match entry.operator {
            FAMILY_NAME => {
                out.extend_from_slice(&encode_int(family_sid));
                wrote_family = true;
            }
            FULL_NAME => {
                out.extend_from_slice(&encode_int(full_name_sid));
                wrote_full_name = true;
            }
            _ => {
                for (i, operand) in entry.operands.iter().enumerate() {
                    if shifted_operand == Some(i) {
                        out.extend_from_slice(&shift(operand, delta)?);
                    } else {
                        out.extend_from_slice(operand.raw);
                    }
                }
            }
        }
        push_operator(&mut out, entry.operator);
    }

    if !wrote_family {
        out.extend_from_slice(&encode_int(family_sid));
        push_operator(&mut out, FAMILY_NAME);
    }
    if !wrote_full_name {
        out.extend_from_slice(&encode_int(full_name_sid));
        push_operator(&mut out, FULL_NAME);
    }
    Ok(out)
}

/// Serialize a CFF INDEX using the smallest offset size that fits.
fn write_index<T: AsRef<[u8]>>(items: &[T]) -> Result<Vec<u8>> {
    let count = u16::try_from(items.len()).context("too many objects for a CFF INDEX")?;
    if count == 0 {
        return Ok(vec![0, 0]);
    }

    let data_len: usize = items.iter().map(|item| item.as_ref().len()).sum();
    let off_size: usize = match data_len + 1 {
        0..=0xff => 1,
        0x100..=0xffff => 2,
        0x1_0000..=0xff_ffff => 3,
        _ => 4,
    };

    let mut out = Vec::with_capacity(3 + (items.len() + 1) * off_size + data_len);
    out.extend_from_slice(&count.to_be_bytes());
    out.push(off_size as u8);

    let mut offset = 1u32;
    out.extend_from_slice(&offset.to_be_bytes()[4 - off_size..]);
    for item in items {
        offset += item.as_ref().len() as u32;
        out.extend_from_slice(&offset.to_be_bytes()[4 - off_size..]);
    }
    for item in items {
        out.extend_from_slice(item.as_ref());
    }
    Ok(out)
}
