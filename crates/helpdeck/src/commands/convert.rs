//! `helpdeck convert` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use helpdeck_config::{CliSettings, Config};
use helpdeck_document::Converter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Plain-text or markdown file to convert (`-` reads stdin).
    input: PathBuf,

    /// Write the document JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leading whitespace characters per list nesting level (overrides config).
    #[arg(long)]
    indent_width: Option<usize>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read
    /// or the output cannot be written.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            indent_width: self.indent_width,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let text = super::read_input(&self.input)?;
        let json = convert_to_json(&text, config.convert.indent_width)?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, json)?;
                Output::new().success(&format!("Wrote {}", path.display()));
            }
            None => super::write_result(&json)?,
        }
        Ok(())
    }
}

/// Convert plain text into pretty-printed document JSON.
fn convert_to_json(text: &str, indent_width: usize) -> Result<String, CliError> {
    let doc = Converter::new()
        .with_indent_width(indent_width)
        .convert(text);
    Ok(serde_json::to_string_pretty(&doc)?)
}
