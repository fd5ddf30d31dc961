//! Generate RPM and Debian changelogs out of Git history.
//!
//! Commits are walked newest-first, grouped into releases at tags that look
//! like versions, filtered, and rendered with one header per release.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod exit_codes;
pub mod filter;
pub mod fmt;
pub mod git;
pub mod ui;
pub mod version;

pub use error::{ChangelogError, Result};
