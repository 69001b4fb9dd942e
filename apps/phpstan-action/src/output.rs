//! Terminal styling for messages written to stderr.
//!
//! Stdout carries workflow commands only, so nothing here ever prints to it.

use owo_colors::OwoColorize;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// `error:` prefix, red and bold unless `NO_COLOR` is set.
pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Print a terminal error line for `err`.
pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("{} {}", error_prefix(), err);
}
