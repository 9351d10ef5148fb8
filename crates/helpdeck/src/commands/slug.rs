//! `helpdeck slug` command implementation.

use clap::Args;
use helpdeck_document::slugify;

use crate::error::CliError;

/// Arguments for the slug command.
#[derive(Args)]
pub(crate) struct SlugArgs {
    /// Article title.
    title: String,
}

impl SlugArgs {
    /// Execute the slug command.
    ///
    /// # Errors
    ///
    /// Returns an error if the title has no characters usable in a slug.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let slug = slugify(&self.title);
        if slug.is_empty() {
            return Err(CliError::Validation(format!(
                "Title {:?} produces an empty slug",
                self.title
            )));
        }
        super::write_result(&slug)
    }
}
