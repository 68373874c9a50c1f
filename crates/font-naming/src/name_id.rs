//! Name table slots (nameIDs) and their labels.

use std::borrow::Cow;

pub const COPYRIGHT: u16 = 0;
pub const FAMILY_NAME: u16 = 1;
pub const STYLE: u16 = 2;
pub const UNIQUE_ID: u16 = 3;
pub const FULL_NAME: u16 = 4;
pub const VERSION: u16 = 5;
pub const POSTSCRIPT_NAME: u16 = 6;
pub const TRADEMARK: u16 = 7;
pub const MANUFACTURER: u16 = 8;
pub const DESIGNER: u16 = 9;
pub const DESCRIPTION: u16 = 10;
pub const VENDOR_URL: u16 = 11;
pub const DESIGNER_URL: u16 = 12;
pub const LICENSE_DESCRIPTION: u16 = 13;
pub const LICENSE_INFO_URL: u16 = 14;
pub const PREFERRED_FAMILY_NAME: u16 = 16;
pub const PREFERRED_STYLE: u16 = 17;
pub const COMPATIBLE_FULL_NAME: u16 = 18;
pub const SAMPLE_TEXT: u16 = 19;
pub const PS_CID_FINDFONT_NAME: u16 = 20;
pub const WWS_FAMILY_NAME: u16 = 21;
pub const WWS_STYLE: u16 = 22;

/// A known nameID with its identifier and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSlot {
    pub id: u16,
    pub key: &'static str,
    pub label: &'static str,
}

const fn slot(id: u16, key: &'static str, label: &'static str) -> NameSlot {
    NameSlot { id, key, label }
}

pub static NAME_SLOTS: &[NameSlot] = &[
    slot(COPYRIGHT, "COPYRIGHT", "Copyright"),
    slot(FAMILY_NAME, "FAMILY_NAME", "Family name"),
    slot(STYLE, "STYLE", "Style"),
    slot(UNIQUE_ID, "UNIQUE_ID", "Unique identifier"),
    slot(FULL_NAME, "FULL_NAME", "Full name"),
    slot(VERSION, "VERSION", "Version"),
    slot(POSTSCRIPT_NAME, "POSTSCRIPT_NAME", "PostScript name"),
    slot(TRADEMARK, "TRADEMARK", "Trademark"),
    slot(MANUFACTURER, "MANUFACTURER", "Manufacturer"),
    slot(DESIGNER, "DESIGNER", "Designer"),
    slot(DESCRIPTION, "DESCRIPTION", "Description"),
    slot(VENDOR_URL, "VENDOR_URL", "Vendor URL"),
    slot(DESIGNER_URL, "DESIGNER_URL", "Designer URL"),
    slot(LICENSE_DESCRIPTION, "LICENSE_DESCRIPTION", "License description"),
    slot(LICENSE_INFO_URL, "LICENSE_INFO_URL", "License info URL"),
    slot(PREFERRED_FAMILY_NAME, "PREFERRED_FAMILY_NAME", "Preferred family name"),
    slot(PREFERRED_STYLE, "PREFERRED_STYLE", "Preferred style"),
    slot(COMPATIBLE_FULL_NAME, "COMPATIBLE_FULL_NAME", "Compatible full name"),
    slot(SAMPLE_TEXT, "SAMPLE_TEXT", "Sample text"),
    slot(PS_CID_FINDFONT_NAME, "PS_CID_FINDFONT_NAME", "PS CID findfont name"),
    slot(WWS_FAMILY_NAME, "WWS_FAMILY_NAME", "WWS family name"),
    slot(WWS_STYLE, "WWS_STYLE", "WWS style"),
];

pub fn lookup(id: u16) -> Option<&'static NameSlot> {
    NAME_SLOTS.iter().find(|s| s.id == id)
}

/// Identifier such as `FAMILY_NAME`, for logs.
pub fn key(id: u16) -> Option<&'static str> {
    lookup(id).map(|s| s.key)
}

/// Human-readable label, or `nameID=<id>` for unknown slots.
pub fn label(id: u16) -> Cow<'static, str> {
    match lookup(id) {
        Some(slot) => Cow::Borrowed(slot.label),
        None => Cow::Owned(format!("nameID={id}")),
    }
}
