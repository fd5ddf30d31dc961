use std::fmt;

use git2::Oid;

use crate::filter::Exclusion;

/// Non-fatal findings of a run, returned next to the changelog so callers
/// decide how to report them.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Several qualifying tags point at one commit; the lexicographically
    /// smallest one names the release
    AmbiguousTags {
        commit: Oid,
        chosen: String,
        ignored: Vec<String>,
    },
    /// Commit left out of its release group
    ExcludedCommit {
        commit: Oid,
        headline: String,
        reason: Exclusion,
    },
    /// The walk found no tag accepted by the version rules
    NoQualifyingTags,
    /// The walk produced no commits at all
    EmptyHistory,
}

impl Diagnostic {
    /// Whether the finding deserves a warning rather than an info line
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::AmbiguousTags { .. } | Diagnostic::EmptyHistory
        )
    }
}

fn short(oid: &Oid) -> String {
    let full = oid.to_string();
    full[..7].to_string()
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AmbiguousTags {
                commit,
                chosen,
                ignored,
            } => write!(
                f,
                "Commit {} carries several release tags; using '{}', ignoring {}",
                short(commit),
                chosen,
                ignored
                    .iter()
                    .map(|tag| format!("'{}'", tag))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Diagnostic::ExcludedCommit {
                commit,
                headline,
                reason,
            } => write!(f, "Ignoring commit {} ({}): {}", short(commit), reason, headline),
            Diagnostic::NoQualifyingTags => {
                write!(f, "No release tags found; all commits belong to the current version")
            }
            Diagnostic::EmptyHistory => write!(f, "No commits in the requested range"),
        }
    }
}
