//! Main workflow orchestration logic
//!
//! Keeps the changelog pipeline (validate, open, resolve, walk, segment,
//! collate, render) apart from CLI argument parsing so it can be driven
//! programmatically.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use git2::Oid;
use tracing::{info, instrument};

use crate::analyzer::{HeaderCollator, TreeSegmenter};
use crate::config::{Config, OutputFormat};
use crate::diagnostics::Diagnostic;
use crate::domain::Changelog;
use crate::error::{ChangelogError, Result};
use crate::filter::CommitFilter;
use crate::fmt;
use crate::git::{Git2Repository, Repository};
use crate::version::VersionMatcher;

/// Arguments for the changelog workflow
///
/// Mirrors the CLI arguments that are not part of [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogWorkflowArgs {
    /// Repository to read; parent directories are not searched
    pub repo_path: PathBuf,

    /// Newest commit to include
    pub until: String,

    /// Lower boundary; commits reachable from it are left out
    pub since: Option<String>,
}

impl Default for ChangelogWorkflowArgs {
    fn default() -> Self {
        ChangelogWorkflowArgs {
            repo_path: PathBuf::from("."),
            until: "HEAD".to_string(),
            since: None,
        }
    }
}

/// Result of a successful changelog run
#[derive(Debug, Clone)]
pub struct WorkflowResult {
    pub format: OutputFormat,
    pub changelog: Changelog,
    pub diagnostics: Vec<Diagnostic>,
}

impl WorkflowResult {
    /// Render the changelog in the configured format
    pub fn render(&self) -> Result<String> {
        fmt::render(self.format, &self.changelog)
    }
}

/// Configured pipeline, ready to run against any [`Repository`]
///
/// Building it validates the configuration and compiles every pattern, so
/// bad input is rejected before history is touched.
pub struct ChangelogGenerator {
    format: OutputFormat,
    segmenter: TreeSegmenter,
    collator: HeaderCollator,
}

impl ChangelogGenerator {
    pub fn from_config(config: &Config) -> Result<Self> {
        let format = config.validate()?;
        let matcher = VersionMatcher::from_pattern(
            config.tags.custom_pattern.as_deref(),
            config.tags.prefix.clone(),
        )?;
        let filter = CommitFilter::new(&config.filter)?;

        Ok(ChangelogGenerator {
            format,
            segmenter: TreeSegmenter::new(matcher, filter),
            collator: HeaderCollator::new(config.release.clone()),
        })
    }

    /// Walk `until` (down to `since`), segment and collate
    pub fn generate<R: Repository + ?Sized>(
        &self,
        repo: &R,
        until: &str,
        since: Option<&str>,
    ) -> Result<WorkflowResult> {
        let upper = resolve_limit(repo, "until", until)?;
        let lower = since
            .map(|since| resolve_limit(repo, "since", since))
            .transpose()?;

        let segmentation = self
            .segmenter
            .segment(repo, repo.iter_commits(upper, lower)?)?;
        let headers = self.collator.collate(repo, &segmentation.releases)?;

        Ok(WorkflowResult {
            format: self.format,
            changelog: Changelog::new(segmentation.releases, headers),
            diagnostics: segmentation.diagnostics,
        })
    }
}

fn resolve_limit<R: Repository + ?Sized>(repo: &R, argument: &str, reference: &str) -> Result<Oid> {
    let oid = repo
        .resolve_reference(reference)
        .map_err(|e| ChangelogError::invalid_limit(argument, reference, e))?;
    info!(argument, reference, commit = %oid, "resolved changelog boundary");
    Ok(oid)
}

/// Main changelog workflow
///
/// 1. Validate configuration and compile patterns
/// 2. Open the repository
/// 3. Resolve `until`/`since`
/// 4. Walk, segment and collate
#[instrument(skip_all, fields(path = %args.repo_path.display()))]
pub fn run_changelog_workflow(
    args: &ChangelogWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let generator = ChangelogGenerator::from_config(config)?;
    let repo = Git2Repository::open(&args.repo_path)?;
    generator.generate(&repo, &args.until, args.since.as_deref())
}

/// Write a rendered changelog to `path`, or standard output without one
///
/// Rendering completes before anything is written.
pub fn write_output(result: &WorkflowResult, path: Option<&Path>) -> Result<()> {
    let rendered = result.render()?;
    match path {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(path = %path.display(), "changelog written");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(rendered.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
