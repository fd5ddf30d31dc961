use crate::diagnostics::Diagnostic;
use crate::domain::{Commit, ReleaseKey, ReleaseMap};
use crate::error::Result;
use crate::filter::CommitFilter;
use crate::git::Repository;
use crate::version::VersionMatcher;
use tracing::{debug, info};

/// Release groups produced by one walk, plus what was noticed on the way
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub releases: ReleaseMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Splits a newest-first commit sequence into release groups
///
/// Each qualifying tag closes the group collected so far and opens a new
/// one keyed by that tag. Commits seen before the first qualifying tag go
/// to [`ReleaseKey::Unreleased`].
pub struct TreeSegmenter {
    matcher: VersionMatcher,
    filter: CommitFilter,
}

impl TreeSegmenter {
    /// Create a new segmenter
    pub fn new(matcher: VersionMatcher, filter: CommitFilter) -> Self {
        TreeSegmenter { matcher, filter }
    }

    /// Consume `commits` once, in order, and group them by release
    ///
    /// Tags are checked before the commit filter, so a tagged commit that is
    /// itself filtered out still opens its release group. Only the group
    /// being filled is buffered.
    pub fn segment<R, I>(&self, repo: &R, commits: I) -> Result<Segmentation>
    where
        R: Repository + ?Sized,
        I: IntoIterator<Item = Result<Commit>>,
    {
        let mut releases = ReleaseMap::new();
        let mut diagnostics = Vec::new();
        let mut current_key = ReleaseKey::Unreleased;
        let mut current_group: Vec<Commit> = Vec::new();
        let mut walked = 0usize;
        let mut tagged = false;

        for commit in commits {
            let commit = commit?;
            walked += 1;
            debug!(commit = %commit.id, headline = commit.headline(), "processing commit");

            if let Some(tag) = self.release_tag(repo, &commit, &mut diagnostics)? {
                let finished = std::mem::take(&mut current_group);
                let previous = std::mem::replace(&mut current_key, ReleaseKey::Tag(tag));
                close_group(&mut releases, previous, finished);
                tagged = true;
            }

            match self.filter.exclusion(&commit) {
                Some(reason) => {
                    info!(commit = %commit.id, %reason, "ignoring commit");
                    diagnostics.push(Diagnostic::ExcludedCommit {
                        commit: commit.id,
                        headline: commit.headline().to_string(),
                        reason,
                    });
                }
                None => current_group.push(commit),
            }
        }
        close_group(&mut releases, current_key, current_group);

        if walked == 0 {
            debug!("history walk produced no commits");
            diagnostics.push(Diagnostic::EmptyHistory);
        } else if !tagged {
            diagnostics.push(Diagnostic::NoQualifyingTags);
        }

        debug!(walked, releases = releases.len(), "segmented history");
        Ok(Segmentation {
            releases,
            diagnostics,
        })
    }

    /// The qualifying tag opening a release at `commit`, if any
    ///
    /// With several candidates the lexicographically smallest wins, whatever
    /// order the repository lists them in.
    fn release_tag<R: Repository + ?Sized>(
        &self,
        repo: &R,
        commit: &Commit,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<String>> {
        let mut qualifying = self.matcher.matching_only(&repo.tags_at(commit.id)?, None);
        if qualifying.is_empty() {
            return Ok(None);
        }

        qualifying.sort();
        let chosen = qualifying.remove(0);
        if !qualifying.is_empty() {
            debug!(commit = %commit.id, %chosen, ignored = ?qualifying, "several release tags on one commit");
            diagnostics.push(Diagnostic::AmbiguousTags {
                commit: commit.id,
                chosen: chosen.clone(),
                ignored: qualifying,
            });
        }

        Ok(Some(chosen))
    }
}

fn close_group(releases: &mut ReleaseMap, key: ReleaseKey, group: Vec<Commit>) {
    if group.is_empty() {
        return;
    }
    // A key can only repeat if one tag name points at two commits
    releases.entry(key).or_default().extend(group);
}
