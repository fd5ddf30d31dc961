use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ChangelogError, Result};

/// Jira-style issue reference, e.g. `PROJ-123`.
pub const DEFAULT_BUG_TRACKING_PATTERN: &str = r"\b(([A-Z]{1,10})-?)[A-Z]+-[1-9]+\d*\b";

/// Label used for commits newer than the most recent release tag.
pub const DEFAULT_CURRENT_VERSION: &str = "current";

/// Represents the complete configuration for git-changelog.
///
/// Every section is optional in the TOML file; command-line flags are merged
/// on top of whatever the file provides.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub tags: TagConfig,
}

/// Changelog flavour to render.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Rpm,
    Deb,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Rpm => write!(f, "rpm"),
            OutputFormat::Deb => write!(f, "deb"),
        }
    }
}

/// Debian release urgency, applied to every release in the changelog.
#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
    Emergency,
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Emergency => "emergency",
            Urgency::Critical => "critical",
        };
        f.write_str(name)
    }
}

impl FromStr for Urgency {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            "emergency" => Ok(Urgency::Emergency),
            "critical" => Ok(Urgency::Critical),
            other => Err(ChangelogError::config(format!(
                "Unknown urgency '{}'",
                other
            ))),
        }
    }
}

/// Where and how the changelog is written.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Standard output is used when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Static release metadata and header sourcing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_current_version")]
    pub current_version: String,

    /// Take release date and author from annotated tags instead of commits.
    #[serde(default)]
    pub prefer_tags: bool,

    #[serde(default)]
    pub urgency: Urgency,

    #[serde(default)]
    pub distribution: Option<String>,

    #[serde(default)]
    pub package_name: Option<String>,
}

fn default_current_version() -> String {
    DEFAULT_CURRENT_VERSION.to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            current_version: default_current_version(),
            prefer_tags: false,
            urgency: Urgency::default(),
            distribution: None,
            package_name: None,
        }
    }
}

/// Commit exclusion rules.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilterConfig {
    #[serde(default)]
    pub exclude_merges: bool,

    #[serde(default)]
    pub bug_tracking_only: bool,

    #[serde(default = "default_bug_tracking_pattern")]
    pub bug_tracking_pattern: String,
}

fn default_bug_tracking_pattern() -> String {
    DEFAULT_BUG_TRACKING_PATTERN.to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            exclude_merges: false,
            bug_tracking_only: false,
            bug_tracking_pattern: default_bug_tracking_pattern(),
        }
    }
}

/// Release tag recognition. Semantic Versioning applies when no custom
/// pattern is set.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TagConfig {
    #[serde(default)]
    pub custom_pattern: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,
}

impl Config {
    /// Checks option combinations that cannot be expressed by the parser.
    ///
    /// Runs before any repository access so that a bad invocation never
    /// produces partial output.
    pub fn validate(&self) -> Result<OutputFormat> {
        let format = self.output.format.ok_or_else(|| {
            ChangelogError::config("An output format (rpm or deb) must be specified")
        })?;

        if format == OutputFormat::Deb {
            if is_blank(self.release.package_name.as_deref()) {
                return Err(ChangelogError::config(
                    "For 'deb', the package name (-n) is mandatory",
                ));
            }
            if is_blank(self.release.distribution.as_deref()) {
                return Err(ChangelogError::config(
                    "For 'deb', the --deb-distribution is mandatory",
                ));
            }
        }

        Ok(format)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitchangelog.toml` in current directory
/// 3. `.gitchangelog.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new("./gitchangelog.toml").exists() {
        PathBuf::from("./gitchangelog.toml")
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(".gitchangelog.toml");
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration file");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ChangelogError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    toml::from_str(&config_str).map_err(|e| {
        ChangelogError::config(format!("Cannot parse {}: {}", path.display(), e))
    })
}
