//! Hook output formatting.
//!
//! Git relays both streams of a hook to the pushing client, prefixed with
//! `remote:`. Statuses go to stdout, diagnostics to stderr.

use pushgate_entity::RefUpdateCommand;

/// Print one status line per command
pub fn print_statuses(commands: &[RefUpdateCommand]) {
    for command in commands {
        println!("{}: {}", command.ref_name(), command.status());
    }
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}
