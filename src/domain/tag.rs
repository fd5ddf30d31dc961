use crate::domain::Signature;

/// What a history source knows about a tag beyond its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMetadata {
    pub name: String,
    /// Present only for annotated tags
    pub tagger: Option<Signature>,
}

impl TagMetadata {
    /// Metadata for a bare pointer tag
    pub fn lightweight(name: impl Into<String>) -> Self {
        TagMetadata {
            name: name.into(),
            tagger: None,
        }
    }

    /// Metadata for a tag object carrying its own tagger
    pub fn annotated(name: impl Into<String>, tagger: Signature) -> Self {
        TagMetadata {
            name: name.into(),
            tagger: Some(tagger),
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.tagger.is_some()
    }
}
