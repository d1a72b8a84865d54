//! Warnings and errors for human output

use keel::config::ConfigWarning;

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

pub fn print_error(error: &anyhow::Error) {
    eprintln!("Error: {:#}", error);
}
