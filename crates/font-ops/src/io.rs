//! Font file handles.

use std::{
    borrow::Cow,
    fs::{read, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::NameTable;

/// A font file on disk, read and overwritten in place.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final path component, for status messages.
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path.file_name().unwrap_or_default().to_string_lossy()
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }

    /// Read the file and decode its `name` table.
    pub fn read_names(&self) -> Result<NameTable> {
        NameTable::from_data(&self.read()?)
            .with_context(|| format!("Failed to read names of {}", self.path.display()))
    }

    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        write(&self.path, data)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))
    }

    /// Read, rewrite and save back to the same path.
    pub fn transform(&self, f: impl FnOnce(&[u8]) -> Result<Vec<u8>>) -> Result<()> {
        let data = self.read()?;
        let new_data =
            f(&data).with_context(|| format!("Failed to process {}", self.path.display()))?;
        self.write(new_data)
    }
}
