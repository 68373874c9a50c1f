//! Command-line front end for the fontinfo tools.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Mode};
