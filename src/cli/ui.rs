use colored::*;
use console::Term;
use textwrap::wrap;

use propbus::{ErrorSeverity, PropertyError};

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text wrapped to the terminal width
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(4).max(20)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Print a property error, colored by severity
pub fn print_property_error(error: &PropertyError) {
    match error.severity() {
        ErrorSeverity::Warning => print_warning(&error.to_string()),
        ErrorSeverity::Error => print_error(&error.to_string()),
    }
}

/// Print one change notification
pub fn print_change(name: &str, old: &str, new: &str) {
    println!("  {} {} {} {}", name.bold(), old.dimmed(), "->".cyan(), new.green());
}
