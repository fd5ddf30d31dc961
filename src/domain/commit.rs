use chrono::{DateTime, TimeZone, Utc};
use git2::Oid;

/// A person and the moment they authored or tagged something
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub when: DateTime<Utc>,
}

impl Signature {
    /// Create a signature from raw parts, `seconds` being a Unix timestamp
    pub fn new(name: impl Into<String>, email: impl Into<String>, seconds: i64) -> Self {
        Signature {
            name: name.into(),
            email: email.into(),
            when: Utc.timestamp_opt(seconds, 0).single().unwrap_or_default(),
        }
    }
}

impl From<&git2::Signature<'_>> for Signature {
    fn from(sig: &git2::Signature<'_>) -> Self {
        Signature::new(
            String::from_utf8_lossy(sig.name_bytes()),
            String::from_utf8_lossy(sig.email_bytes()),
            sig.when().seconds(),
        )
    }
}

/// Immutable commit record produced by a history source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: Oid,
    /// Empty for a root commit, two or more for a merge
    pub parents: Vec<Oid>,
    pub author: Signature,
    pub message: String,
}

impl Commit {
    /// Create a new commit record
    pub fn new(id: Oid, parents: Vec<Oid>, author: Signature, message: impl Into<String>) -> Self {
        Commit {
            id,
            parents,
            author,
            message: message.into(),
        }
    }

    /// First line of the message, surrounding whitespace stripped
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }

    /// Everything after the headline
    pub fn body(&self) -> Option<&str> {
        self.message
            .split_once('\n')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Seven character abbreviation of the commit id
    pub fn short_id(&self) -> String {
        let full = self.id.to_string();
        full[..7].to_string()
    }
}

impl From<&git2::Commit<'_>> for Commit {
    fn from(commit: &git2::Commit<'_>) -> Self {
        Commit {
            id: commit.id(),
            parents: commit.parent_ids().collect(),
            author: Signature::from(&commit.author()),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        }
    }
}
