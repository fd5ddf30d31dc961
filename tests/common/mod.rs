// tests/common/mod.rs
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

pub const AUTHOR_NAME: &str = "Pytest Forever";
pub const AUTHOR_EMAIL: &str = "author@example.com";

/// Repository in a temporary directory whose commits are one minute apart
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        TestRepo {
            dir,
            repo,
            clock: 1_500_000_000,
        }
    }

    /// Repository with a linear history on HEAD
    pub fn with_messages(messages: &[&str]) -> Self {
        let mut test_repo = TestRepo::new();
        for message in messages {
            test_repo.commit(message);
        }
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn tick(&mut self) -> Time {
        self.clock += 60;
        Time::new(self.clock, 0)
    }

    /// Commit on top of HEAD
    pub fn commit(&mut self, message: &str) -> Oid {
        let parents: Vec<Oid> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .into_iter()
            .collect();
        self.commit_on("HEAD", message, &parents)
    }

    /// Commit with explicit parents, moving `update_ref` to it
    pub fn commit_on(&mut self, update_ref: &str, message: &str, parents: &[Oid]) -> Oid {
        let when = self.tick();
        let signature = Signature::new(AUTHOR_NAME, AUTHOR_EMAIL, &when).unwrap();
        let tree_id = self.repo.treebuilder(None).unwrap().write().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parents: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();

        self.repo
            .commit(
                Some(update_ref),
                &signature,
                &signature,
                message,
                &tree,
                &parent_refs,
            )
            .unwrap()
    }

    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        self.repo.branch(name, &commit, false).unwrap();
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    pub fn annotated_tag(&self, name: &str, target: Oid, tagger: &str, email: &str, seconds: i64) {
        let object = self.repo.find_object(target, None).unwrap();
        let signature = Signature::new(tagger, email, &Time::new(seconds, 0)).unwrap();
        self.repo
            .tag(name, &object, &signature, &format!("Release {}", name), false)
            .unwrap();
    }
}
