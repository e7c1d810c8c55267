use crate::ports::outbound::ProgressReporter;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes to stderr so messages never interleave with a report on stdout.
/// Colors are used only when stderr is a terminal.
pub struct StderrProgressReporter {
    colored: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            colored: std::io::stderr().is_terminal(),
        }
    }

    /// Reporter that never emits ANSI escapes
    pub fn plain() -> Self {
        Self { colored: false }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_warning(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message.yellow());
        } else {
            eprintln!("⚠️  Warning: {}", message);
        }
    }

    fn report_error(&self, message: &str) {
        if self.colored {
            eprintln!("{}", message.red());
        } else {
            eprintln!("{}", message);
        }
    }

    fn report_completion(&self, message: &str) {
        if self.colored {
            eprintln!("{}", message.green());
        } else {
            eprintln!("{}", message);
        }
    }
}
