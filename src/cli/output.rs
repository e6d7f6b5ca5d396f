//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Print the application header with name and version.
pub fn header(version: &str) {
    println!("{} {}", "tradebell".bold(), version.dimmed());
    println!();
}

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<16} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a note/hint.
pub fn note(message: &str) {
    println!("  {}", message.dimmed());
}

/// Format an on/off toggle.
pub fn toggle(enabled: bool) -> String {
    if enabled {
        format!("{}", "on".green())
    } else {
        format!("{}", "off".dimmed())
    }
}
