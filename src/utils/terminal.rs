//! Terminal output utilities
//!
//! All messages go to stdout with a severity-colored prefix.

use console::style;

/// Print an error message
pub fn print_error(message: &str) {
    println!("{}: {}", style("ERR ").red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{}: {}", style("WARN").yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{}: {}", style("INFO").green().bold(), message);
}

/// Print a detail line, shown only in verbose mode
pub fn print_verbose(verbose: bool, message: &str) {
    if verbose {
        println!("{}: {}", style("VERB").dim(), message);
    }
}

/// Disable colored output on both streams
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}
