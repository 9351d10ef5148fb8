//! `helpdeck render` command implementation.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use helpdeck_config::{CliSettings, Config};
use helpdeck_renderer::{RenderMode, render_with_mode};

use crate::error::CliError;

/// Render mode as accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Html,
    Preview,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Html => Self::Html,
            ModeArg::Preview => Self::Preview,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Stored content to render: document JSON or legacy text (`-` reads stdin).
    input: PathBuf,

    /// Output mode (overrides config).
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Escape inline text in HTML output (default: enabled).
    #[arg(long)]
    escape_html: Option<bool>,

    /// Disable HTML escaping.
    #[arg(long, conflicts_with = "escape_html")]
    no_escape_html: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let rendered = self.render(config_path)?;
        super::write_result(&rendered)
    }

    /// Load configuration with CLI overrides and render the input.
    fn render(&self, config_path: Option<&Path>) -> Result<String, CliError> {
        let cli_settings = CliSettings {
            mode: self.mode.map(RenderMode::from),
            escape_html: self.resolve_escape_html(),
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let content = super::read_input(&self.input)?;
        let rendered = render_with_mode(
            config.render.mode,
            content.as_str(),
            config.render.escape_html,
        );

        tracing::info!(
            mode = config.render.mode.as_str(),
            bytes = rendered.len(),
            "Rendered content"
        );
        Ok(rendered)
    }

    /// Resolve `escape_html` from --escape-html/--no-escape-html flags.
    fn resolve_escape_html(&self) -> Option<bool> {
        self.no_escape_html.then_some(false).or(self.escape_html)
    }
}
