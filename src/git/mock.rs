use crate::domain::{Commit, Signature, TagMetadata};
use crate::error::{ChangelogError, Result};
use crate::git::{CommitIter, Repository};
use git2::Oid;
use std::collections::{HashMap, HashSet};

const MOCK_AUTHOR: &str = "Mock Author";
const MOCK_EMAIL: &str = "mock@example.com";
const MOCK_EPOCH: i64 = 1_500_000_000;

/// In-memory history for testing without actual git operations
///
/// Commits must be added parents-first; the walk yields them newest-first
/// in reverse insertion order, which is then a valid topological order.
pub struct MockRepository {
    commits: Vec<Commit>,
    tags: Vec<(String, Oid)>,
    tag_metadata: HashMap<String, TagMetadata>,
    references: HashMap<String, Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            tag_metadata: HashMap::new(),
            references: HashMap::new(),
        }
    }

    /// Add a fully specified commit
    pub fn add_commit(&mut self, commit: Commit) -> Oid {
        let id = commit.id;
        self.references.insert("HEAD".to_string(), id);
        self.commits.push(commit);
        id
    }

    /// Add a commit with a generated id, one minute after the previous one
    pub fn commit(&mut self, message: &str, parents: &[Oid]) -> Oid {
        let sequence = self.commits.len() as u32 + 1;
        let author = Signature::new(MOCK_AUTHOR, MOCK_EMAIL, MOCK_EPOCH + 60 * sequence as i64);
        self.add_commit(Commit::new(
            generated_oid(sequence),
            parents.to_vec(),
            author,
            message,
        ))
    }

    /// Add a linear chain of commits on top of the current HEAD
    pub fn linear_history(&mut self, messages: &[&str]) -> Vec<Oid> {
        messages
            .iter()
            .map(|message| {
                let parents: Vec<Oid> = self.references.get("HEAD").copied().into_iter().collect();
                self.commit(message, &parents)
            })
            .collect()
    }

    /// Add a lightweight tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        let name = name.into();
        self.tag_metadata
            .insert(name.clone(), TagMetadata::lightweight(name.clone()));
        self.tags.push((name, oid));
    }

    /// Add an annotated tag carrying its own tagger
    pub fn add_annotated_tag(&mut self, name: impl Into<String>, oid: Oid, tagger: Signature) {
        let name = name.into();
        self.tag_metadata
            .insert(name.clone(), TagMetadata::annotated(name.clone(), tagger));
        self.tags.push((name, oid));
    }

    /// Keep the tag listed but make its metadata unavailable, as if the tag
    /// was deleted after the history walk
    pub fn forget_tag_metadata(&mut self, name: &str) {
        self.tag_metadata.remove(name);
    }

    /// Point a named reference (branch, `HEAD`) at a commit
    pub fn set_reference(&mut self, name: impl Into<String>, oid: Oid) {
        self.references.insert(name.into(), oid);
    }

    fn find_commit(&self, oid: Oid) -> Option<&Commit> {
        self.commits.iter().find(|commit| commit.id == oid)
    }

    /// Ids reachable from `start` through parent links, `start` included
    fn ancestors(&self, start: Oid) -> HashSet<Oid> {
        let mut seen = HashSet::new();
        let mut pending = vec![start];

        while let Some(oid) = pending.pop() {
            if !seen.insert(oid) {
                continue;
            }
            if let Some(commit) = self.find_commit(oid) {
                pending.extend(commit.parents.iter().copied());
            }
        }

        seen
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn generated_oid(sequence: u32) -> Oid {
    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&sequence.wrapping_mul(2_654_435_761).to_be_bytes());
    bytes[16..].copy_from_slice(&sequence.to_be_bytes());
    Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero())
}

impl Repository for MockRepository {
    fn resolve_reference(&self, name: &str) -> Result<Oid> {
        if let Some(oid) = self.references.get(name) {
            return Ok(*oid);
        }
        if let Some((_, oid)) = self.tags.iter().find(|(tag, _)| tag == name) {
            return Ok(*oid);
        }

        let lowered = name.to_ascii_lowercase();
        let mut candidates = self
            .commits
            .iter()
            .filter(|commit| lowered.len() >= 4 && commit.id.to_string().starts_with(&lowered));

        match (candidates.next(), candidates.next()) {
            (Some(commit), None) => Ok(commit.id),
            _ => Err(ChangelogError::UnresolvableReference(name.to_string())),
        }
    }

    fn tags_at(&self, commit: Oid) -> Result<Vec<String>> {
        Ok(self
            .tags
            .iter()
            .filter(|(_, target)| *target == commit)
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn tag_metadata(&self, tag_name: &str) -> Result<TagMetadata> {
        self.tag_metadata
            .get(tag_name)
            .cloned()
            .ok_or_else(|| ChangelogError::MissingTag(tag_name.to_string()))
    }

    fn iter_commits(&self, upper: Oid, lower: Option<Oid>) -> Result<CommitIter<'_>> {
        if self.find_commit(upper).is_none() {
            return Err(ChangelogError::UnresolvableReference(upper.to_string()));
        }

        let reachable = self.ancestors(upper);
        let hidden = lower.map(|lower| self.ancestors(lower)).unwrap_or_default();

        Ok(Box::new(
            self.commits
                .iter()
                .rev()
                .filter(move |commit| reachable.contains(&commit.id) && !hidden.contains(&commit.id))
                .cloned()
                .map(Ok),
        ))
    }
}
