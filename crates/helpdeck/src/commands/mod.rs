//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod migrate;
pub(crate) mod render;
pub(crate) mod slug;

pub(crate) use convert::ConvertArgs;
pub(crate) use migrate::MigrateArgs;
pub(crate) use render::RenderArgs;
pub(crate) use slug::SlugArgs;

use std::io::{self, Write};
use std::path::Path;

use crate::error::CliError;

/// Read a command input file, with `-` meaning stdin.
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        return Ok(io::read_to_string(io::stdin())?);
    }
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a command result line to stdout.
pub(crate) fn write_result(text: &str) -> Result<(), CliError> {
    writeln!(io::stdout().lock(), "{text}")?;
    Ok(())
}
