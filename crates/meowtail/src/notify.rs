//! Console notifier: mutation outcomes on stderr.

use owo_colors::OwoColorize;

use meowtail_core::Notifier;

pub struct ConsoleNotifier {
    quiet: bool,
    color: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool, color: bool) -> Self {
        Self { quiet, color }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {message}", "✓".green());
        } else {
            eprintln!("✓ {message}");
        }
    }

    fn error(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", "✗".red(), message.red());
        } else {
            eprintln!("✗ {message}");
        }
    }
}
