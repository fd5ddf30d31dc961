//! Terminal reporting for the command-line tool.
//!
//! Standard output carries the changelog itself, so every message here goes
//! to standard error.

use console::style;

use crate::diagnostics::Diagnostic;

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Format a warning message with a yellow prefix.
pub fn format_warning(message: &str) -> String {
    format!("{} {}", style("WARNING:").yellow().bold(), message)
}

/// Format a success message with a green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

pub fn display_warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

/// Print the diagnostics that deserve a warning.
///
/// Informational findings are left to the log, which shows them with `-v`.
pub fn display_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics.iter().filter(|d| d.is_warning()) {
        display_warning(&diagnostic.to_string());
    }
}
