//! Message formatting and display.
//!
//! Warnings and errors go to stderr so that stdout stays clean for `--json`
//! reports. Everything else is gated on a [`Verbosity`].
//!
//! # Examples
//!
//! ```
//! use pdfstack::output::formatter::{OutputFormatter, Verbosity};
//!
//! let formatter = OutputFormatter::new(Verbosity::Normal);
//! formatter.info("Stacking files...");
//! formatter.success("Merge completed");
//! formatter.error("Something went wrong");
//! ```

use crate::config::Config;
use std::io::{self, IsTerminal};

/// How much the formatter prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    /// Progress, the merge order and the result.
    #[default]
    Normal,
    /// Also document ids, debug lines and detailed statistics.
    Verbose,
}

impl Verbosity {
    /// Verbosity for a run configuration.
    ///
    /// JSON output and `--quiet` (outside dry runs) both silence the
    /// formatter; `--verbose` only counts when text is printed at all.
    pub fn for_config(config: &Config) -> Self {
        if !config.should_print() {
            Self::Quiet
        } else if config.verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    /// Least verbosity at which the level is shown.
    fn threshold(self) -> Verbosity {
        match self {
            Self::Warning | Self::Error => Verbosity::Quiet,
            Self::Info | Self::Success => Verbosity::Normal,
            Self::Debug => Verbosity::Verbose,
        }
    }

    fn decoration(self) -> (&'static str, &'static str) {
        match self {
            Self::Info => ("", ""),
            Self::Success => ("✓ ", "\x1b[32m"),
            Self::Warning => ("⚠ ", "\x1b[33m"),
            Self::Error => ("✗ ", "\x1b[31m"),
            Self::Debug => ("→ ", "\x1b[36m"),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    verbosity: Verbosity,
    colored: bool,
}

impl OutputFormatter {
    /// Create a formatter; colour is used on a terminal with `TERM` set.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            colored: io::stdout().is_terminal() && std::env::var("TERM").is_ok(),
        }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Verbosity::for_config(config))
    }

    /// Print an informational message.
    pub fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Print an error message, even in quiet mode.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Print a message only shown in verbose mode.
    pub fn debug(&self, message: &str) {
        self.emit(MessageLevel::Debug, message);
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        if self.verbosity < level.threshold() {
            return;
        }

        let line = self.format_message(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Render a message with level-appropriate decoration.
    pub fn format_message(&self, level: MessageLevel, message: &str) -> String {
        let (prefix, color_code) = level.decoration();

        if self.colored && !color_code.is_empty() {
            format!("{color_code}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if self.should_print() {
            println!("\n{title}");
        }
    }

    /// Print a `label: value` line in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.is_verbose() {
            println!("  {label}: {value}");
        }
    }

    /// Print a blank line.
    pub fn blank_line(&self) {
        if self.should_print() {
            println!();
        }
    }

    /// Print one entry of an ordered list, numbered from 1.
    pub fn list_item(&self, position: usize, message: &str) {
        if self.should_print() {
            println!("{}", format_list_item(position, message));
        }
    }

    /// Current verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// True unless quiet.
    pub fn should_print(&self) -> bool {
        self.verbosity > Verbosity::Quiet
    }

    /// True in verbose mode.
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// True in quiet mode.
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

fn format_list_item(position: usize, message: &str) -> String {
    format!("  {position:>3}. {message}")
}
