//! Error types for naming operations.

use std::{path::PathBuf, result};

/// Errors that can occur while renaming or editing name tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("family name is empty")]
    EmptyFamilyName,

    #[error("font style is empty in '{}'", path.display())]
    EmptyStyle { path: PathBuf },

    #[error(transparent)]
    Font(#[from] anyhow::Error),
}

pub type Result<T> = result::Result<T, Error>;
