use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use git_changelog::cli::log_level_from_verbosity;
use git_changelog::cli::orchestration::{run_changelog_workflow, write_output, ChangelogWorkflowArgs};
use git_changelog::config::{self, Config, OutputFormat, Urgency};
use git_changelog::{exit_codes, ui, ChangelogError};

#[derive(clap::Parser)]
#[command(
    name = "git-changelog",
    version,
    about = "Generate RPM or Debian changelogs out of Git history"
)]
struct Args {
    #[arg(short = 'p', long, default_value = ".", help = "Path to the Git repository")]
    path: PathBuf,

    #[arg(short = 'O', long, value_enum, help = "Changelog format to produce")]
    output_format: Option<OutputFormat>,

    #[arg(short = 'o', long, help = "Write the changelog to this file instead of stdout")]
    output_file: Option<PathBuf>,

    #[arg(short = 'u', long, default_value = "HEAD", help = "Newest commit to include")]
    until: String,

    #[arg(short = 's', long, help = "Leave out commits reachable from this reference")]
    since: Option<String>,

    #[arg(short = 'c', long, help = "Version label of unreleased commits [default: current]")]
    current_version: Option<String>,

    #[arg(short = 'x', long, help = "Leave out merge commits")]
    exclude_merges: bool,

    #[arg(short = 'b', long, help = "Keep only commits referencing a bug")]
    bug_tracking_only: bool,

    #[arg(short = 'B', long, help = "Pattern recognising bug references")]
    bug_tracking_pattern: Option<String>,

    #[arg(short = 't', long, help = "Take release date and author from annotated tags")]
    prefer_tags: bool,

    #[arg(short = 'T', long, help = "Pattern tags must match instead of semantic versioning")]
    custom_tag_pattern: Option<String>,

    #[arg(short = 'P', long, help = "Prefix stripped from tags before matching")]
    tag_prefix: Option<String>,

    #[arg(short = 'D', long, help = "Debian distribution of every release")]
    deb_distribution: Option<String>,

    #[arg(short = 'n', long, help = "Debian package name")]
    deb_package_name: Option<String>,

    #[arg(short = 'U', long, value_enum, help = "Debian urgency of every release")]
    deb_urgency: Option<Urgency>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity")]
    verbose: u8,

    #[arg(long, help = "Custom configuration file path")]
    config: Option<PathBuf>,
}

impl Args {
    /// Flags given on the command line win over the configuration file.
    fn apply(&self, config: &mut Config) {
        if let Some(format) = self.output_format {
            config.output.format = Some(format);
        }
        if let Some(file) = &self.output_file {
            config.output.file = Some(file.clone());
        }
        if let Some(version) = &self.current_version {
            config.release.current_version = version.clone();
        }
        config.release.prefer_tags |= self.prefer_tags;
        if let Some(urgency) = self.deb_urgency {
            config.release.urgency = urgency;
        }
        if let Some(distribution) = &self.deb_distribution {
            config.release.distribution = Some(distribution.clone());
        }
        if let Some(package) = &self.deb_package_name {
            config.release.package_name = Some(package.clone());
        }
        config.filter.exclude_merges |= self.exclude_merges;
        config.filter.bug_tracking_only |= self.bug_tracking_only;
        if let Some(pattern) = &self.bug_tracking_pattern {
            config.filter.bug_tracking_pattern = pattern.clone();
        }
        if let Some(pattern) = &self.custom_tag_pattern {
            config.tags.custom_pattern = Some(pattern.clone());
        }
        if let Some(prefix) = &self.tag_prefix {
            config.tags.prefix = Some(prefix.clone());
        }
    }

    fn workflow_args(&self) -> ChangelogWorkflowArgs {
        ChangelogWorkflowArgs {
            repo_path: self.path.clone(),
            until: self.until.clone(),
            since: self.since.clone(),
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level_from_verbosity(verbosity).to_string()));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() {
                exit_codes::ARGPARSE_FAILURE
            } else {
                exit_codes::SUCCESS
            });
        }
    };

    init_tracing(args.verbose);

    if let Err(err) = run(&args) {
        ui::display_error(&format!("{:#}", err));
        let code = err
            .downcast_ref::<ChangelogError>()
            .map(ChangelogError::exit_code)
            .unwrap_or(exit_codes::PROCESSING_FAILED);
        std::process::exit(code);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;
    args.apply(&mut config);

    let result = run_changelog_workflow(&args.workflow_args(), &config)?;
    ui::display_diagnostics(&result.diagnostics);

    let output = config.output.file.as_deref();
    write_output(&result, output)?;
    if let Some(path) = output {
        ui::display_success(&format!("Changelog written to {}", path.display()));
    }
    Ok(())
}
