//! Domain logic - plain records derived from the history source

pub mod commit;
pub mod release;
pub mod tag;

pub use commit::{Commit, Signature};
pub use release::{Changelog, HeaderMap, ReleaseHeader, ReleaseKey, ReleaseMap};
pub use tag::TagMetadata;
