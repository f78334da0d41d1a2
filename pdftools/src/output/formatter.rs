//! Message formatting and display.
//!
//! Status lines for the user go to stdout through [`OutputFormatter`].
//! Diagnostics go through `tracing` instead.
//!
//! # Examples
//!
//! ```
//! use pdftools::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false);
//! formatter.info("Splitting report.pdf");
//! formatter.success("Wrote 3 file(s)");
//! ```

use std::io;

use crate::config::GlobalOptions;

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
    /// Detail shown only with `--debug`.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color_code(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Debug => "\x1b[36m",
        }
    }
}

/// Output formatter with configurable verbosity.
pub struct OutputFormatter {
    /// Whether to show detail lines.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter that shows detail lines when `--debug` is on.
    pub fn from_options(options: &GlobalOptions) -> Self {
        Self::new(options.debug)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message.
    pub fn info(&self, message: &str) {
        self.print_message(MessageLevel::Info, message);
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        self.print_message(MessageLevel::Success, message);
    }

    /// Print a warning message.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a detail message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        println!("{}", self.format_message(level, message));
    }

    /// Render a message line with its prefix and, on a terminal, its color.
    pub fn format_message(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        let color_code = level.color_code();

        if self.colored && !color_code.is_empty() {
            format!("{color_code}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    /// Print a labelled value. Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a numbered list item.
    pub fn list_item(&self, index: usize, message: &str) {
        println!("  {index}. {message}");
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}
