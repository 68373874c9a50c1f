//! In-place edits of existing name records.

use fontinfo_font_ops::{FontFile, NameTable, replace_name_table};
use log::info;

use crate::{Result, name_id::POSTSCRIPT_NAME};

/// Replace every occurrence of `old` with `new` in every record.
///
/// Returns the number of records whose value changed.
pub fn replace_string(table: &mut NameTable, old: &str, new: &str) -> usize {
    if old.is_empty() {
        return 0;
    }
    let mut changed = 0;
    for record in table.records_mut() {
        if record.value.contains(old) {
            record.value = record.value.replace(old, new);
            changed += 1;
        }
    }
    changed
}

/// Set the PostScript name of every record, on every platform and language.
pub fn rename_postscript(table: &mut NameTable, postscript_name: &str) -> usize {
    table.set_all(POSTSCRIPT_NAME, postscript_name)
}

/// Read a font, edit its name table and write it back in place.
///
/// `edit` returns the number of records it changed, which is passed through.
pub fn edit_names(file: &FontFile, edit: impl FnOnce(&mut NameTable) -> usize) -> Result<usize> {
    let mut changed = 0;
    file.transform(|data| {
        let mut table = NameTable::from_data(data)?;
        changed = edit(&mut table);
        replace_name_table(data, &table)
    })?;
    info!("{}: {changed} name records changed", file.file_name());
    Ok(changed)
}
