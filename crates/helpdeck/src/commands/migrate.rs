//! `helpdeck migrate` command implementation.
//!
//! Converts a directory of legacy plain-text articles into stored document
//! JSON, one `<slug>.json` file per article.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Args;
use helpdeck_config::{CliSettings, Config};
use helpdeck_document::{Converter, slugify};
use rayon::prelude::*;

use crate::error::CliError;
use crate::output::Output;

/// File extensions treated as legacy article sources.
const SOURCE_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Arguments for the migrate command.
#[derive(Args)]
pub(crate) struct MigrateArgs {
    /// Legacy content directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Directory to write document JSON files to (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl MigrateArgs {
    /// Execute the migrate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source directory cannot
    /// be listed or the output directory cannot be created.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let source_dir = &config.content_resolved.source_dir;
        let output_dir = &config.content_resolved.output_dir;

        output.info(&format!("Source: {}", source_dir.display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let converter = Converter::new().with_indent_width(config.convert.indent_width);
        let report = migrate_dir(source_dir, output_dir, &converter)?;

        for (path, reason) in &report.failed {
            output.warning(&format!("Skipped {}: {reason}", path.display()));
        }
        output.success(&format!(
            "Migrated {} article(s), {} skipped",
            report.migrated.len(),
            report.failed.len()
        ));
        Ok(())
    }
}

/// Outcome of migrating a directory.
#[derive(Debug, Default)]
struct MigrateReport {
    /// Written document files.
    migrated: Vec<PathBuf>,
    /// Source files that were not migrated, with the reason.
    failed: Vec<(PathBuf, String)>,
}

/// A source file paired with the slug its document is stored under.
struct Job {
    source: PathBuf,
    slug: String,
}

/// Convert every source article in `source_dir` into `output_dir`.
fn migrate_dir(
    source_dir: &Path,
    output_dir: &Path,
    converter: &Converter,
) -> Result<MigrateReport, CliError> {
    let mut sources = list_sources(source_dir)?;
    sources.sort();

    let mut report = MigrateReport::default();
    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(sources.len());
    for source in sources {
        let title = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let slug = slugify(&title);
        if slug.is_empty() {
            report
                .failed
                .push((source, "title produces an empty slug".to_owned()));
        } else if !seen.insert(slug.clone()) {
            report
                .failed
                .push((source, format!("slug {slug:?} already used")));
        } else {
            jobs.push(Job { source, slug });
        }
    }

    std::fs::create_dir_all(output_dir)?;

    let results: Vec<_> = jobs
        .par_iter()
        .map(|job| {
            migrate_file(job, output_dir, converter)
                .map_err(|err| (job.source.clone(), err.to_string()))
        })
        .collect();

    for result in results {
        match result {
            Ok(path) => report.migrated.push(path),
            Err(failure) => report.failed.push(failure),
        }
    }

    tracing::info!(
        migrated = report.migrated.len(),
        failed = report.failed.len(),
        "Migration finished"
    );
    Ok(report)
}

/// Convert a single article and write its document JSON.
fn migrate_file(job: &Job, output_dir: &Path, converter: &Converter) -> Result<PathBuf, CliError> {
    let text = std::fs::read_to_string(&job.source)?;
    let doc = converter.convert(&text);
    let json = serde_json::to_string_pretty(&doc)?;

    let target = output_dir.join(format!("{}.json", job.slug));
    std::fs::write(&target, json)?;
    tracing::debug!(
        source = %job.source.display(),
        target = %target.display(),
        blocks = doc.blocks.len(),
        "Migrated article"
    );
    Ok(target)
}

/// List regular files in `dir` with a source extension.
fn list_sources(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CliError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_source = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
        if path.is_file() && is_source {
            sources.push(path);
        }
    }
    Ok(sources)
}
