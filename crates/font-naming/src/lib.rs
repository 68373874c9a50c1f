//! Font naming metadata: derive consistent family/style/PostScript names,
//! synchronize them across platform records, replace substrings and print
//! name tables.

mod error;
pub mod name_id;
mod plan;
mod print;
mod rename;
mod replace;

pub use error::{Error, Result};
pub use fontinfo_font_ops::{FontFile, LANG_TAG_BASE, NAME_TAG, NameRecord, NameTable, PlatformIds};
pub use plan::{NamingPlan, OriginalNames, WINDOWS_STYLES};
pub use print::{LABEL_WIDTH, PRIORITY_NAME_IDS, Printer, friendly_order};
pub use rename::{CffSync, PendingRename, RenameOutcome, RenameRequest, prepare};
pub use replace::{edit_names, rename_postscript, replace_string};
