//! Rename mode: plan every font first, then write them one by one.

use std::path::Path;

use fontinfo_font_ops::{CFF_TAG, FontFile, NAME_TAG, NameTable, rename_cff, rewrite_font};
use log::{info, warn};
use read_fonts::FontRef;
use write_fonts::FontBuilder;

use crate::{
    Error, Result,
    name_id::STYLE,
    plan::{NamingPlan, OriginalNames},
};

/// What the user asked for in rename mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub family_name: String,
    /// Requested style; the font's own STYLE record is used when absent.
    pub style: Option<String>,
    pub windows_compatible: bool,
}

impl RenameRequest {
    pub fn new(family_name: impl Into<String>) -> Self {
        Self { family_name: family_name.into(), style: None, windows_compatible: false }
    }

    /// Set the style. An empty style counts as no style.
    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style.filter(|s| !s.is_empty());
        self
    }

    pub fn with_windows_compatible(mut self, windows_compatible: bool) -> Self {
        self.windows_compatible = windows_compatible;
        self
    }

    /// Build the plan for a font, or `None` if no style can be resolved.
    pub fn plan(&self, table: &NameTable) -> Option<NamingPlan> {
        let style = match &self.style {
            Some(style) => style.as_str(),
            None => table.find(STYLE).unwrap_or_default(),
        };
        if style.is_empty() {
            return None;
        }

        let plan = NamingPlan::new(&self.family_name, style, self.windows_compatible)
            .with_original(&OriginalNames::from_table(table));
        Some(plan)
    }
}

/// Load and plan every font in `paths`.
///
/// Nothing is written here, so a font without a resolvable style aborts the
/// whole batch before any file changes.
pub fn prepare<P: AsRef<Path>>(request: &RenameRequest, paths: &[P]) -> Result<Vec<PendingRename>> {
    if request.family_name.is_empty() {
        return Err(Error::EmptyFamilyName);
    }
    paths.iter().map(|path| PendingRename::load(request, FontFile::new(path.as_ref()))).collect()
}

/// A font that has been read and planned but not yet written.
#[derive(Debug)]
pub struct PendingRename {
    file: FontFile,
    data: Vec<u8>,
    table: NameTable,
    plan: NamingPlan,
}

impl PendingRename {
    fn load(request: &RenameRequest, file: FontFile) -> Result<Self> {
        let data = file.read()?;
        let table = NameTable::from_data(&data)?;
        let plan = request
            .plan(&table)
            .ok_or_else(|| Error::EmptyStyle { path: file.path().to_owned() })?;
        info!("{}: '{}' ({})", file.file_name(), plan.full_name, plan.postscript_name);
        Ok(Self { file, data, table, plan })
    }

    pub fn file(&self) -> &FontFile {
        &self.file
    }

    pub fn plan(&self) -> &NamingPlan {
        &self.plan
    }

    /// Apply the plan and overwrite the font file.
    ///
    /// A failure to mirror the names into the CFF table is reported in the
    /// outcome; the name table changes are saved regardless.
    pub fn commit(mut self) -> Result<RenameOutcome> {
        self.plan.apply(&mut self.table);

        let mut cff = CffSync::Absent;
        let data = rewrite_font(&self.data, |font, builder| {
            builder.add_raw(NAME_TAG, self.table.to_bytes()?);
            cff = sync_cff(font, builder, &self.plan);
            Ok(())
        })?;
        self.file.write(data)?;

        Ok(RenameOutcome { file: self.file, cff })
    }
}

/// State of the CFF copy of the names after a rename.
#[derive(Debug)]
pub enum CffSync {
    /// The font has no `CFF ` table.
    Absent,
    Updated,
    /// The CFF table was left unchanged.
    Failed(anyhow::Error),
}

fn sync_cff(font: &FontRef, builder: &mut FontBuilder, plan: &NamingPlan) -> CffSync {
    let Some(table) = font.table_data(CFF_TAG) else {
        return CffSync::Absent;
    };
    match rename_cff(table.as_bytes(), &plan.cff_names()) {
        Ok(data) => {
            builder.add_raw(CFF_TAG, data);
            CffSync::Updated
        }
        Err(e) => {
            warn!("unable to update CFF table with the new names: {e:#}");
            CffSync::Failed(e)
        }
    }
}

/// Result of a committed rename.
#[derive(Debug)]
pub struct RenameOutcome {
    pub file: FontFile,
    pub cff: CffSync,
}
