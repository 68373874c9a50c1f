use fontinfo_font_ops::{CffNames, NameTable, PlatformIds};
use log::debug;

use crate::name_id::{
    FAMILY_NAME, FULL_NAME, POSTSCRIPT_NAME, PREFERRED_FAMILY_NAME, PREFERRED_STYLE, STYLE,
    UNIQUE_ID, key,
};

/// Style names Windows recognizes within a four-member family.
pub const WINDOWS_STYLES: [&str; 7] = [
    "Regular",
    "Regular Italic",
    "Regular Oblique",
    "Italic",
    "Bold",
    "Bold Italic",
    "Bold Oblique",
];

/// Slant keywords folded into the family name for Windows compatibility.
const SLANTS: [&str; 2] = ["Italic", "Oblique"];

/// Naming values a font carries before renaming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalNames {
    pub full_name: String,
    pub postscript_name: String,
    pub unique_id: String,
}

impl OriginalNames {
    pub fn from_table(table: &NameTable) -> Self {
        let find = |id| table.find(id).unwrap_or_default().to_owned();
        Self {
            full_name: find(FULL_NAME),
            postscript_name: find(POSTSCRIPT_NAME),
            unique_id: find(UNIQUE_ID),
        }
    }

    /// The unique ID with the old PostScript name (or, failing that, the old
    /// full name) swapped for the new one. `None` when neither occurs in it.
    fn renamed_unique_id(&self, postscript_name: &str, full_name: &str) -> Option<String> {
        if !self.postscript_name.is_empty() && self.unique_id.contains(&self.postscript_name) {
            Some(self.unique_id.replace(&self.postscript_name, postscript_name))
        } else if !self.full_name.is_empty() && self.unique_id.contains(&self.full_name) {
            Some(self.unique_id.replace(&self.full_name, full_name))
        } else {
            None
        }
    }
}

/// The complete set of names written to one font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPlan {
    /// nameID 1. Widened with the width/weight part of the style in
    /// Windows-compatible mode.
    pub family_name: String,
    /// nameID 2, only written in Windows-compatible mode.
    pub style: String,
    pub preferred_family_name: String,
    pub preferred_style: String,
    pub full_name: String,
    pub postscript_name: String,
    /// Updated nameID 3, when the old one embedded the old names.
    pub unique_id: Option<String>,
    pub windows_compatible: bool,
}

impl NamingPlan {
    /// Derive names from the requested family and style.
    pub fn new(family_name: &str, style: &str, windows_compatible: bool) -> Self {
        let preferred_family_name = family_name.to_owned();
        let preferred_style = style.to_owned();
        let mut family_name = family_name.to_owned();
        let mut style = style.to_owned();

        if windows_compatible
            && !WINDOWS_STYLES.contains(&preferred_style.as_str())
            && let Some(slant) = SLANTS.into_iter().find(|s| preferred_style.contains(s))
        {
            let rest = preferred_style.replace(&format!(" {slant}"), "");
            family_name = format!("{preferred_family_name} {rest}");
            style = slant.to_owned();
        }

        let full_name = format!("{preferred_family_name} {preferred_style}");
        let postscript_name = format!(
            "{}-{}",
            preferred_family_name.replace(' ', ""),
            preferred_style.replace(' ', "")
        );

        Self {
            family_name,
            style,
            preferred_family_name,
            preferred_style,
            full_name,
            postscript_name,
            unique_id: None,
            windows_compatible,
        }
    }

    /// Carry the font's unique ID over to the new names.
    pub fn with_original(mut self, original: &OriginalNames) -> Self {
        self.unique_id = original.renamed_unique_id(&self.postscript_name, &self.full_name);
        self
    }

    /// Write the plan to the Mac Roman and Windows English records.
    pub fn apply(&self, table: &mut NameTable) {
        for ids in [PlatformIds::MAC_ROMAN, PlatformIds::WINDOWS_ENGLISH] {
            let mut set = |name_id, value: &str| {
                debug!("{}: {value}", key(name_id).unwrap_or_default());
                table.set(name_id, ids, value);
            };
            set(FAMILY_NAME, &self.family_name);
            set(FULL_NAME, &self.full_name);
            set(POSTSCRIPT_NAME, &self.postscript_name);
            set(PREFERRED_FAMILY_NAME, &self.preferred_family_name);
            set(PREFERRED_STYLE, &self.preferred_style);
            if let Some(unique_id) = &self.unique_id {
                set(UNIQUE_ID, unique_id);
            }
            if self.windows_compatible {
                set(STYLE, &self.style);
            }
        }
    }

    pub fn cff_names(&self) -> CffNames<'_> {
        CffNames {
            family_name: &self.family_name,
            full_name: &self.full_name,
            font_name: &self.postscript_name,
        }
    }
}
