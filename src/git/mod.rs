//! History source abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! operations changelog generation needs, allowing for multiple
//! implementations including real git repositories and in-memory histories
//! for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Code walking or segmenting history should depend on the [Repository]
//! trait rather than a concrete implementation.
//!
//! ```rust
//! # use git_changelog::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_changelog::Result<()> {
//! let head = repo.resolve_reference("HEAD")?;
//! for commit in repo.iter_commits(head, None)? {
//!     let commit = commit?;
//!     println!("{} {}", commit.short_id(), commit.headline());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, TagMetadata};
use crate::error::Result;
use git2::Oid;

/// Lazy, single-pass sequence of commits produced by a history walk
pub type CommitIter<'a> = Box<dyn Iterator<Item = Result<Commit>> + 'a>;

/// Read-only view of a commit history and its tag catalog
///
/// All methods return [crate::error::Result<T>]; implementations map their
/// underlying errors to [crate::error::ChangelogError] variants.
pub trait Repository {
    /// Resolve a user-supplied reference to a commit id
    ///
    /// Accepts anything the source understands as naming a commit: branch
    /// and tag names, full or abbreviated hashes, revision expressions.
    ///
    /// # Returns
    /// * `Ok(Oid)` - Id of the commit the reference names
    /// * `Err(UnresolvableReference)` - If the name does not lead to a commit
    fn resolve_reference(&self, name: &str) -> Result<Oid>;

    /// Names of the tags pointing exactly at `commit`
    ///
    /// May be empty. Order is whatever the source natively provides.
    fn tags_at(&self, commit: Oid) -> Result<Vec<String>>;

    /// Metadata of a tag by name
    ///
    /// # Returns
    /// * `Ok(TagMetadata)` - With tagger data for annotated tags
    /// * `Err(MissingTag)` - If no tag of that name exists
    fn tag_metadata(&self, tag_name: &str) -> Result<TagMetadata>;

    /// Walk history from `upper` down, newest first
    ///
    /// Yields every commit reachable from `upper` that is not reachable from
    /// `lower`, in topological order (children before parents), like
    /// `git rev-list lower..upper`. Without `lower` the walk runs to the
    /// root commits.
    fn iter_commits(&self, upper: Oid, lower: Option<Oid>) -> Result<CommitIter<'_>>;
}
