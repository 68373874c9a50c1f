//! Font file I/O and table rewriting helpers.

mod cff;
mod io;
mod name_table;

use anyhow::Result;
use read_fonts::FontRef;
use write_fonts::FontBuilder;

pub use cff::{CFF_TAG, CffNames, rename_cff};
pub use io::FontFile;
pub use name_table::{LANG_TAG_BASE, NAME_TAG, NameRecord, NameTable, PlatformIds};

/// Rewrite font data by applying a transformation function.
///
/// Copies all tables from the source font, then calls `f` to modify or add tables.
/// The function receives a reference to the source font and a mutable builder
/// that already contains all original tables.
pub fn rewrite_font(
    data: &[u8],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    f(&font, &mut builder)?;
    Ok(builder.build())
}

/// Replace the `name` table of a font, keeping every other table as is.
pub fn replace_name_table(data: &[u8], table: &NameTable) -> Result<Vec<u8>> {
    rewrite_font(data, |_font, builder| {
        builder.add_raw(NAME_TAG, table.to_bytes()?);
        Ok(())
    })
}
