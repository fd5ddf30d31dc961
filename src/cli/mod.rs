//! Command-line glue: the changelog workflow and verbosity handling

pub mod orchestration;

use tracing::Level;

/// Log level for a `-v` count: warnings by default, then info, debug and
/// trace.
pub fn log_level_from_verbosity(count: u8) -> Level {
    match count {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
