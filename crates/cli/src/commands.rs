//! One function per CLI mode.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Result;
use fontinfo_font_naming::{
    CffSync, FontFile, Printer, RenameRequest, edit_names, prepare, replace_string,
};
use fontinfo_text_layout::Layout;
use log::info;

/// `updated 1 font`, `updated 3 fonts`.
fn summary(count: usize) -> String {
    format!("updated {count} font{}", if count > 1 { "s" } else { "" })
}

/// Rename every font. Nothing is written unless all fonts could be planned.
pub fn rename(out: &mut impl Write, request: &RenameRequest, fonts: &[PathBuf]) -> Result<()> {
    let pending = prepare(request, fonts)?;
    let count = pending.len();

    for rename in pending {
        let outcome = rename.commit()?;
        if let CffSync::Failed(e) = &outcome.cff {
            eprintln!("unable to update CFF table with the new names.");
            eprintln!("{e:#}");
        }
        writeln!(out, "updated '{}'", outcome.file.file_name())?;
    }
    writeln!(out, "{}", summary(count))?;
    Ok(())
}

pub fn replace(out: &mut impl Write, fonts: &[PathBuf], old: &str, new: &str) -> Result<()> {
    for path in fonts {
        let file = FontFile::new(path);
        edit_names(&file, |table| replace_string(table, old, new))?;
        writeln!(out, "updated '{}'", file.file_name())?;
    }
    writeln!(out, "{}", summary(fonts.len()))?;
    Ok(())
}

pub fn rename_postscript(out: &mut impl Write, path: &Path, name: &str) -> Result<()> {
    let file = FontFile::new(path);
    edit_names(&file, |table| fontinfo_font_naming::rename_postscript(table, name))?;
    writeln!(out, "updated '{}'", file.file_name())?;
    Ok(())
}

/// Print the raw and friendly views of every font, separated by two blank lines.
pub fn dump(out: &mut impl Write, fonts: &[PathBuf], layout: Layout) -> Result<()> {
    let printer = Printer::new(layout);

    for (i, path) in fonts.iter().enumerate() {
        let file = FontFile::new(path);
        let table = file.read_names()?;
        info!("{}: {} name records", file.file_name(), table.len());

        if i > 0 {
            writeln!(out, "\n")?;
        }
        printer.write_dump(out, &file.file_name(), &table)?;
    }
    Ok(())
}
