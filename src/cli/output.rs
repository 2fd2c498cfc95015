use std::fmt;

use colored::Colorize;

/// Prints an informational message.
pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan(), message);
}

/// Prints a success message.
pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green(), message);
}

/// Prints a warning message.
pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow(), message);
}

/// Prints an error message.
pub fn error(message: impl fmt::Display) {
    println!("{} {}", "[x]".red(), message);
}
