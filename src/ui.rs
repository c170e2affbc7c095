//! Styled status output for the command line.
//!
//! Everything here writes to stderr so the computed artifact on stdout
//! stays machine-readable.

use console::style;

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a status/progress message.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Print a labeled value, e.g. the resolved current version.
pub fn display_field(label: &str, value: &str) {
    eprintln!("{} {}", style(label).bold(), value);
}
