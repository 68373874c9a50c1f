//! CLI definitions and mode dispatch.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use fontinfo_font_naming::RenameRequest;
use fontinfo_text_layout::Layout;

use crate::commands;

#[derive(Debug, Parser)]
#[command(name = "fontinfo", version)]
#[command(about = "Show, rename and edit the naming metadata of OpenType fonts")]
#[command(after_help = "Examples:\n  \
    fontinfo Test-Regular.otf\n  \
    fontinfo -f 'Test Sans' Test-*.otf\n  \
    fontinfo -f 'Test Sans' -s 'Condensed Italic' -w Test-CondensedItalic.otf\n  \
    fontinfo -d 'Old' -n 'New' *.ttf\n  \
    fontinfo -p TestSans-Bold Test-Bold.otf")]
pub struct Cli {
    /// New font family name
    #[arg(short, long, value_name = "NAME", default_value = "")]
    pub family_name: String,
    /// New style (subfamily); read from each font when omitted
    #[arg(short, long, default_value = "")]
    pub style: String,
    /// New PostScript name, applied to the first font only
    #[arg(short, long, value_name = "NAME", default_value = "")]
    pub postscript_name: String,
    /// Windows-compatible style (subfamily) naming
    #[arg(short, long)]
    pub win: bool,
    /// String to be replaced
    #[arg(short = 'd', long, value_name = "OLD", default_value = "")]
    pub old_string: String,
    /// Replacement string
    #[arg(short = 'n', long, value_name = "NEW", default_value = "")]
    pub new_string: String,
    /// Count every character as one column when laying out dumps
    #[arg(long)]
    pub ascii_width: bool,
    /// Path to a font, or multiple fonts
    #[arg(value_name = "FONT", required = true, value_parser = existing_path)]
    pub fonts: Vec<PathBuf>,
}

/// What a run does with its fonts, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Rename(RenameRequest),
    Replace { old: String, new: String },
    RenamePostscript(String),
    Dump,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if !self.family_name.is_empty() {
            let style = Some(self.style.clone());
            Mode::Rename(
                RenameRequest::new(&self.family_name)
                    .with_style(style)
                    .with_windows_compatible(self.win),
            )
        } else if !self.old_string.is_empty() && !self.new_string.is_empty() {
            Mode::Replace { old: self.old_string.clone(), new: self.new_string.clone() }
        } else if !self.postscript_name.is_empty() {
            Mode::RenamePostscript(self.postscript_name.clone())
        } else {
            Mode::Dump
        }
    }

    pub fn layout(&self) -> Layout<'static> {
        if self.ascii_width { Layout::uniform() } else { Layout::detect() }
    }

    pub fn run(&self) -> Result<()> {
        let mut out = io::stdout().lock();
        self.run_with(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Run the selected mode, writing status lines and dumps to `out`.
    pub fn run_with(&self, out: &mut impl Write) -> Result<()> {
        match self.mode() {
            Mode::Rename(request) => commands::rename(out, &request, &self.fonts),
            Mode::Replace { old, new } => commands::replace(out, &self.fonts, &old, &new),
            // `fonts` is a required argument, so it is never empty.
            Mode::RenamePostscript(name) => commands::rename_postscript(out, &self.fonts[0], &name),
            Mode::Dump => commands::dump(out, &self.fonts, self.layout()),
        }
    }
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        let name = path.file_name().unwrap_or(path.as_os_str());
        Err(format!("'{}' could not be found", name.to_string_lossy()))
    }
}
