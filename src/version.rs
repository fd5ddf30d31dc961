use regex::Regex;
use tracing::trace;

use crate::error::{ChangelogError, Result};

/// Rule a tag name has to satisfy to mark a release.
#[derive(Debug, Clone)]
enum VersionRule {
    /// Semantic Versioning 2.0 (`MAJOR.MINOR.PATCH[-pre][+build]`)
    Semantic,
    /// User-supplied pattern, matched from the start of the name
    Custom(Regex),
}

/// Decides which tag names qualify as release markers.
///
/// The rule is chosen once at construction. An optional default prefix
/// (e.g. `v`) is stripped from names before they are checked; names that do
/// not carry the prefix are checked as they are.
#[derive(Debug, Clone)]
pub struct VersionMatcher {
    rule: VersionRule,
    prefix: Option<String>,
}

impl VersionMatcher {
    /// Matcher validating names against Semantic Versioning.
    pub fn semantic(prefix: Option<String>) -> Self {
        VersionMatcher {
            rule: VersionRule::Semantic,
            prefix,
        }
    }

    /// Matcher validating names against a custom regular expression.
    ///
    /// The pattern only has to match at the beginning of the (prefix-stripped)
    /// name; add `$` to require a full match.
    ///
    /// # Errors
    /// Returns [`ChangelogError::Pattern`] if the pattern does not compile.
    pub fn custom(pattern: &str, prefix: Option<String>) -> Result<Self> {
        let anchored = format!(r"\A(?:{})", pattern);
        let regex = Regex::new(&anchored).map_err(|e| ChangelogError::pattern(pattern, e))?;

        Ok(VersionMatcher {
            rule: VersionRule::Custom(regex),
            prefix,
        })
    }

    /// Semantic matcher unless a custom pattern is given.
    pub fn from_pattern(pattern: Option<&str>, prefix: Option<String>) -> Result<Self> {
        match pattern {
            Some(pattern) => Self::custom(pattern, prefix),
            None => Ok(Self::semantic(prefix)),
        }
    }

    /// Whether `name` marks a release.
    ///
    /// `prefix` overrides the matcher's default prefix for this call.
    pub fn qualifies(&self, name: &str, prefix: Option<&str>) -> bool {
        let version = self.strip_prefix(name, prefix);
        if version.is_empty() {
            return false;
        }

        let qualifies = match &self.rule {
            VersionRule::Semantic => semver::Version::parse(version).is_ok(),
            VersionRule::Custom(regex) => regex.is_match(version),
        };
        trace!(name, version, qualifies, "checked tag name");
        qualifies
    }

    /// Keeps the qualifying names, preserving their order.
    pub fn matching_only<S: AsRef<str>>(&self, names: &[S], prefix: Option<&str>) -> Vec<String> {
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| self.qualifies(name, prefix))
            .map(str::to_string)
            .collect()
    }

    fn strip_prefix<'a>(&'a self, name: &'a str, prefix: Option<&'a str>) -> &'a str {
        match prefix.or(self.prefix.as_deref()) {
            Some(prefix) if !prefix.is_empty() => name.strip_prefix(prefix).unwrap_or(name),
            _ => name,
        }
    }
}

impl Default for VersionMatcher {
    fn default() -> Self {
        Self::semantic(None)
    }
}
