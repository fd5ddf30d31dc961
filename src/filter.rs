use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::config::FilterConfig;
use crate::domain::Commit;
use crate::error::{ChangelogError, Result};

/// Why a commit was left out of the changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Merge,
    NoBugReference,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Merge => write!(f, "merge commit"),
            Exclusion::NoBugReference => write!(f, "no bug reference"),
        }
    }
}

/// Decides whether individual commits belong in a changelog entry
#[derive(Debug, Clone)]
pub struct CommitFilter {
    exclude_merges: bool,
    bug_tracking_only: bool,
    bug_pattern: Regex,
}

impl CommitFilter {
    /// Build a filter, compiling the bug-reference pattern up front.
    ///
    /// The pattern has to match at the very start of the message; `^` and `$`
    /// inside it work per line.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let pattern = &config.bug_tracking_pattern;
        let bug_pattern = RegexBuilder::new(&format!(r"\A(?:{})", pattern))
            .multi_line(true)
            .build()
            .map_err(|e| ChangelogError::pattern(pattern.as_str(), e))?;

        Ok(CommitFilter {
            exclude_merges: config.exclude_merges,
            bug_tracking_only: config.bug_tracking_only,
            bug_pattern,
        })
    }

    /// Reason `commit` is dropped, if it is.
    ///
    /// Merge exclusion is checked first and short-circuits.
    pub fn exclusion(&self, commit: &Commit) -> Option<Exclusion> {
        if self.exclude_merges && commit.is_merge() {
            Some(Exclusion::Merge)
        } else if self.bug_tracking_only && !self.bug_pattern.is_match(&commit.message) {
            Some(Exclusion::NoBugReference)
        } else {
            None
        }
    }

    pub fn excluded(&self, commit: &Commit) -> bool {
        self.exclusion(commit).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Signature;
    use git2::Oid;

    fn commit(message: &str, parent_count: u8) -> Commit {
        let parents = (1..=parent_count)
            .map(|n| Oid::from_bytes(&[n; 20]).unwrap())
            .collect();
        Commit::new(
            Oid::from_bytes(&[0xaa; 20]).unwrap(),
            parents,
            Signature::new("Test Author", "author@example.com", 0),
            message,
        )
    }

    fn filter(exclude_merges: bool, bug_tracking_only: bool, pattern: Option<&str>) -> CommitFilter {
        let mut config = FilterConfig {
            exclude_merges,
            bug_tracking_only,
            ..FilterConfig::default()
        };
        if let Some(pattern) = pattern {
            config.bug_tracking_pattern = pattern.to_string();
        }
        CommitFilter::new(&config).unwrap()
    }

    #[test]
    fn test_default_includes_everything() {
        let filter = filter(false, false, None);
        assert!(!filter.excluded(&commit("no ref", 2)));
        assert!(!filter.excluded(&commit("no ref", 0)));
    }

    #[test]
    fn test_exclude_merges() {
        let filter = filter(true, false, None);
        assert_eq!(filter.exclusion(&commit("Merge branch", 2)), Some(Exclusion::Merge));
        assert!(filter.excluded(&commit("octopus", 3)));
        assert!(!filter.excluded(&commit("plain", 1)));
        assert!(!filter.excluded(&commit("root", 0)));
    }

    #[test]
    fn test_bug_tracking_custom_pattern() {
        let filter = filter(false, true, Some(r"ISSUE-\d+"));
        assert!(!filter.excluded(&commit("ISSUE-1 fix", 1)));
        assert_eq!(
            filter.exclusion(&commit("no ref", 1)),
            Some(Exclusion::NoBugReference)
        );
    }

    #[test]
    fn test_bug_reference_must_lead_the_message() {
        let filter = filter(false, true, Some(r"ISSUE-\d+"));
        assert!(filter.excluded(&commit("fix for ISSUE-1", 1)));
        assert!(filter.excluded(&commit("headline\nISSUE-1 in body", 1)));
    }

    #[test]
    fn test_default_jira_pattern() {
        let filter = filter(false, true, None);
        assert!(!filter.excluded(&commit(
            "ISSUE-1 And a third commit\nThis time with a Jira ticket",
            1
        )));
        assert!(!filter.excluded(&commit("PROJ-42 tidy up", 1)));
        assert!(filter.excluded(&commit("And then a second commit", 1)));
    }

    #[test]
    fn test_gitlab_style_pattern() {
        let filter = filter(false, true, Some(r"Issue #\d+\b"));
        assert!(!filter.excluded(&commit("Issue #312 Resolve the bug", 1)));
        assert!(filter.excluded(&commit("Initial commit", 0)));
    }

    #[test]
    fn test_merge_check_short_circuits() {
        let filter = filter(true, true, Some(r"ISSUE-\d+"));
        assert_eq!(
            filter.exclusion(&commit("ISSUE-7 merge", 2)),
            Some(Exclusion::Merge)
        );
    }

    #[test]
    fn test_invalid_bug_pattern() {
        let config = FilterConfig {
            bug_tracking_pattern: "([A-Z]+".to_string(),
            ..FilterConfig::default()
        };
        assert!(matches!(
            CommitFilter::new(&config),
            Err(ChangelogError::Pattern { .. })
        ));
    }
}
