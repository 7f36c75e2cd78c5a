//! Terminal colors for command output.

use colored::Colorize;

/// Wraps text in ANSI colors when enabled.
///
/// `colored` still applies its own terminal detection on top of this switch,
/// so piped output stays plain.
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A colorizer that never emits escape codes.
    pub const fn plain() -> Self {
        Self::new(false)
    }

    fn paint(self, text: &str, paint: impl FnOnce(&str) -> colored::ColoredString) -> String {
        if self.enabled {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Activity names.
    pub fn green(self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    /// Times and durations.
    pub fn yellow(self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    /// Stopped activities.
    pub fn red(self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    /// Tags.
    pub fn blue(self, text: &str) -> String {
        self.paint(text, |t| t.blue())
    }

    pub fn bold(self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }
}
