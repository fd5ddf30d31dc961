//! Exit codes for the CLI

/// Success
pub const SUCCESS: i32 = 0;

/// Command-line arguments rejected by the parser
pub const ARGPARSE_FAILURE: i32 = 2;

/// Invalid configuration or option values
pub const INVALID_INPUT: i32 = 10;

/// Repository path does not exist
pub const REPO_PATH_INVALID: i32 = 11;

/// Repository path is not a git repository
pub const REPO_PATH_NOT_REPO: i32 = 12;

/// `--until` or `--since` does not resolve to a commit
pub const INVALID_VCS_LIMITS: i32 = 13;

/// History walk, collation or output failed
pub const PROCESSING_FAILED: i32 = 20;
