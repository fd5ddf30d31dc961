use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::fmt;

use crate::config::Urgency;
use crate::domain::Commit;

/// Key of a release group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReleaseKey {
    /// Commits newer than the most recent qualifying tag
    Unreleased,
    /// A qualifying tag name
    Tag(String),
}

impl ReleaseKey {
    pub fn tag(name: impl Into<String>) -> Self {
        ReleaseKey::Tag(name.into())
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            ReleaseKey::Unreleased => None,
            ReleaseKey::Tag(name) => Some(name),
        }
    }
}

impl fmt::Display for ReleaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseKey::Unreleased => write!(f, "(unreleased)"),
            ReleaseKey::Tag(name) => f.write_str(name),
        }
    }
}

/// Release groups in emission order, newest release first
pub type ReleaseMap = IndexMap<ReleaseKey, Vec<Commit>>;

/// Headers keyed like the [`ReleaseMap`] they describe
pub type HeaderMap = IndexMap<ReleaseKey, ReleaseHeader>;

/// Metadata printed above each release in the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHeader {
    pub version: String,
    pub date: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
    pub urgency: Urgency,
    pub distribution: Option<String>,
    pub package_name: Option<String>,
}

impl ReleaseHeader {
    /// Date as used by RPM `%changelog` entries, e.g. `Wed Jul 12 2017`
    pub fn date_rpm(&self) -> String {
        self.date.format("%a %b %d %Y").to_string()
    }

    /// RFC 2822 date as used by Debian changelog trailers
    pub fn date_deb(&self) -> String {
        self.date.format("%a, %d %b %Y %H:%M:%S -0000").to_string()
    }
}

/// Everything a format writer needs: the groups and their headers
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    pub releases: ReleaseMap,
    pub headers: HeaderMap,
}

impl Changelog {
    pub fn new(releases: ReleaseMap, headers: HeaderMap) -> Self {
        Changelog { releases, headers }
    }

    /// Releases in emission order paired with their headers
    pub fn entries(&self) -> impl Iterator<Item = (&ReleaseHeader, &[Commit])> {
        self.releases.iter().filter_map(|(key, commits)| {
            self.headers
                .get(key)
                .map(|header| (header, commits.as_slice()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}
