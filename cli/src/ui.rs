//! Status and diagnostic printing
//!
//! Everything here goes to stderr; stdout is reserved for the report.

use colored::Colorize;

/// Disable colours when stderr is not a terminal
pub fn init() {
    if !atty::is(atty::Stream::Stderr) {
        colored::control::set_override(false);
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".bright_red(), msg.red());
}

pub fn print_success(msg: &str) {
    eprintln!("{} {}", "✓".bright_green(), msg.bright_green());
}
