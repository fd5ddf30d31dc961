use crate::domain::{Commit, Signature, TagMetadata};
use crate::error::{ChangelogError, Result};
use crate::git::CommitIter;
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Wrapper around git2::Repository with our trait interface
///
/// Tags are indexed by the commit they peel to when the repository is
/// opened, so per-commit lookups during a walk do not rescan `refs/tags`.
pub struct Git2Repository {
    repo: Git2Repo,
    tags_by_commit: HashMap<Oid, Vec<String>>,
}

impl Git2Repository {
    /// Open the repository at exactly `path`
    ///
    /// Parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChangelogError::RepoPathMissing(path.to_path_buf()));
        }

        let repo = Git2Repo::open(path).map_err(|source| ChangelogError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let tags_by_commit = index_tags(&repo)?;
        Ok(Git2Repository {
            repo,
            tags_by_commit,
        })
    }
}

/// Map each commit to the tags that peel to it
fn index_tags(repo: &Git2Repo) -> Result<HashMap<Oid, Vec<String>>> {
    let mut index: HashMap<Oid, Vec<String>> = HashMap::new();
    let names = repo.tag_names(None)?;

    for name in names.iter().flatten() {
        let reference = match repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => reference,
            Err(e) => {
                warn!(tag = name, error = %e, "skipping unreadable tag");
                continue;
            }
        };

        // Tags on trees or blobs never mark a release
        match reference.peel_to_commit() {
            Ok(commit) => index.entry(commit.id()).or_default().push(name.to_string()),
            Err(_) => debug!(tag = name, "tag does not point at a commit"),
        }
    }

    debug!(tagged_commits = index.len(), "indexed tags");
    Ok(index)
}

impl super::Repository for Git2Repository {
    fn resolve_reference(&self, name: &str) -> Result<Oid> {
        let commit = self
            .repo
            .revparse_single(name)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| {
                debug!(reference = name, error = %e, "cannot resolve reference");
                ChangelogError::UnresolvableReference(name.to_string())
            })?;

        Ok(commit.id())
    }

    fn tags_at(&self, commit: Oid) -> Result<Vec<String>> {
        Ok(self
            .tags_by_commit
            .get(&commit)
            .cloned()
            .unwrap_or_default())
    }

    fn tag_metadata(&self, tag_name: &str) -> Result<TagMetadata> {
        let reference = match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(reference) => reference,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(ChangelogError::MissingTag(tag_name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let target = reference
            .resolve()?
            .target()
            .ok_or_else(|| ChangelogError::MissingTag(tag_name.to_string()))?;

        match self.repo.find_tag(target) {
            Ok(tag) => Ok(TagMetadata {
                name: tag_name.to_string(),
                tagger: tag.tagger().as_ref().map(Signature::from),
            }),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(TagMetadata::lightweight(tag_name)),
            Err(e) => Err(e.into()),
        }
    }

    fn iter_commits(&self, upper: Oid, lower: Option<Oid>) -> Result<CommitIter<'_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(upper)?;
        if let Some(lower) = lower {
            revwalk.hide(lower)?;
        }

        let repo = &self.repo;
        Ok(Box::new(revwalk.map(move |oid| -> Result<Commit> {
            let commit = repo.find_commit(oid?)?;
            Ok(Commit::from(&commit))
        })))
    }
}
