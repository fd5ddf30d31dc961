use crate::config::ReleaseConfig;
use crate::domain::{Commit, HeaderMap, ReleaseHeader, ReleaseKey, ReleaseMap, Signature};
use crate::error::Result;
use crate::git::Repository;
use tracing::{debug, info};

/// Derives the header (date, author, static release fields) of every
/// release group
pub struct HeaderCollator {
    config: ReleaseConfig,
}

impl HeaderCollator {
    /// Create a new header collator
    pub fn new(config: ReleaseConfig) -> Self {
        HeaderCollator { config }
    }

    /// Build one header per release, in release order
    ///
    /// Date and author come from the newest commit of the group, unless
    /// `prefer_tags` is set and the release tag is annotated, in which case
    /// the tagger is used.
    ///
    /// # Errors
    /// Fails with [`crate::ChangelogError::MissingTag`] when a release tag
    /// can no longer be found in the repository.
    pub fn collate<R: Repository + ?Sized>(
        &self,
        repo: &R,
        releases: &ReleaseMap,
    ) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, commits) in releases {
            match self.header_for(repo, key, commits)? {
                Some(header) => {
                    headers.insert(key.clone(), header);
                }
                None => debug!(release = %key, "no commits to derive a header from"),
            }
        }

        Ok(headers)
    }

    fn header_for<R: Repository + ?Sized>(
        &self,
        repo: &R,
        key: &ReleaseKey,
        commits: &[Commit],
    ) -> Result<Option<ReleaseHeader>> {
        let signature = match self.tagger(repo, key)? {
            Some(tagger) => Some(tagger),
            None => commits.first().map(|newest| newest.author.clone()),
        };

        Ok(signature.map(|signature| self.header(key, signature)))
    }

    /// Tagger of an annotated release tag, when tags are preferred
    fn tagger<R: Repository + ?Sized>(&self, repo: &R, key: &ReleaseKey) -> Result<Option<Signature>> {
        let name = match key.tag_name() {
            Some(name) if self.config.prefer_tags => name,
            _ => return Ok(None),
        };

        info!(tag = name, "retrieving details of tag");
        let metadata = repo.tag_metadata(name)?;
        if metadata.tagger.is_none() {
            debug!(tag = name, "lightweight tag, using newest commit instead");
        }
        Ok(metadata.tagger)
    }

    fn header(&self, key: &ReleaseKey, signature: Signature) -> ReleaseHeader {
        let version = match key {
            ReleaseKey::Unreleased => self.config.current_version.clone(),
            ReleaseKey::Tag(name) => name.clone(),
        };

        ReleaseHeader {
            version,
            date: signature.when,
            author_name: signature.name,
            author_email: signature.email,
            urgency: self.config.urgency,
            distribution: self.config.distribution.clone(),
            package_name: self.config.package_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Urgency;
    use crate::error::ChangelogError;
    use crate::git::MockRepository;

    fn release_config(prefer_tags: bool) -> ReleaseConfig {
        ReleaseConfig {
            prefer_tags,
            urgency: Urgency::High,
            distribution: Some("xenial".to_string()),
            package_name: Some("foopkg".to_string()),
            ..ReleaseConfig::default()
        }
    }

    fn tagged_history() -> (MockRepository, ReleaseMap) {
        let mut repo = MockRepository::new();
        let ids = repo.linear_history(&["1", "2", "3"]);
        repo.add_annotated_tag(
            "1.0.0",
            ids[0],
            Signature::new("Release Manager", "rm@example.com", 1_600_000_000),
        );
        repo.add_tag("1.1.0", ids[1]);

        let commits: Vec<Commit> = repo
            .iter_commits(ids[2], None)
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        let mut releases = ReleaseMap::new();
        releases.insert(ReleaseKey::Unreleased, vec![commits[0].clone()]);
        releases.insert(ReleaseKey::tag("1.1.0"), vec![commits[1].clone()]);
        releases.insert(ReleaseKey::tag("1.0.0"), vec![commits[2].clone()]);
        (repo, releases)
    }

    #[test]
    fn test_headers_from_commits_by_default() {
        let (repo, releases) = tagged_history();
        let headers = HeaderCollator::new(release_config(false))
            .collate(&repo, &releases)
            .unwrap();

        assert_eq!(headers.len(), 3);
        for (key, commits) in &releases {
            let header = &headers[key];
            assert_eq!(header.author_name, commits[0].author.name);
            assert_eq!(header.date, commits[0].author.when);
        }
        assert_eq!(headers[&ReleaseKey::Unreleased].version, "current");
        assert_eq!(headers[&ReleaseKey::tag("1.1.0")].version, "1.1.0");
    }

    #[test]
    fn test_headers_keep_release_order() {
        let (repo, releases) = tagged_history();
        let headers = HeaderCollator::new(release_config(false))
            .collate(&repo, &releases)
            .unwrap();
        let keys: Vec<_> = headers.keys().collect();
        let release_keys: Vec<_> = releases.keys().collect();
        assert_eq!(keys, release_keys);
    }

    #[test]
    fn test_prefer_tags_uses_annotated_tagger() {
        let (repo, releases) = tagged_history();
        let headers = HeaderCollator::new(release_config(true))
            .collate(&repo, &releases)
            .unwrap();

        let annotated = &headers[&ReleaseKey::tag("1.0.0")];
        assert_eq!(annotated.author_name, "Release Manager");
        assert_eq!(annotated.author_email, "rm@example.com");
        assert_eq!(annotated.date.timestamp(), 1_600_000_000);

        // Lightweight tag and the unreleased group fall back to commits
        let lightweight = &headers[&ReleaseKey::tag("1.1.0")];
        assert_eq!(lightweight.author_name, "Mock Author");
        assert_eq!(headers[&ReleaseKey::Unreleased].author_name, "Mock Author");
    }

    #[test]
    fn test_static_fields_copied_verbatim() {
        let (repo, releases) = tagged_history();
        let mut config = release_config(false);
        config.current_version = "2.0.0~dev".to_string();
        let headers = HeaderCollator::new(config).collate(&repo, &releases).unwrap();

        for header in headers.values() {
            assert_eq!(header.urgency, Urgency::High);
            assert_eq!(header.distribution.as_deref(), Some("xenial"));
            assert_eq!(header.package_name.as_deref(), Some("foopkg"));
        }
        assert_eq!(headers[&ReleaseKey::Unreleased].version, "2.0.0~dev");
    }

    #[test]
    fn test_dates_derive_from_one_timestamp() {
        let (repo, releases) = tagged_history();
        let headers = HeaderCollator::new(release_config(true))
            .collate(&repo, &releases)
            .unwrap();
        let header = &headers[&ReleaseKey::tag("1.0.0")];
        // 1_600_000_000 is 2020-09-13T12:26:40Z
        assert_eq!(header.date_rpm(), "Sun Sep 13 2020");
        assert_eq!(header.date_deb(), "Sun, 13 Sep 2020 12:26:40 -0000");
    }

    #[test]
    fn test_missing_tag_is_fatal() {
        let (mut repo, releases) = tagged_history();
        repo.forget_tag_metadata("1.0.0");

        let result = HeaderCollator::new(release_config(true)).collate(&repo, &releases);
        assert!(matches!(result, Err(ChangelogError::MissingTag(tag)) if tag == "1.0.0"));
    }

    #[test]
    fn test_missing_tag_ignored_without_prefer_tags() {
        let (mut repo, releases) = tagged_history();
        repo.forget_tag_metadata("1.0.0");
        assert!(HeaderCollator::new(release_config(false))
            .collate(&repo, &releases)
            .is_ok());
    }
}
