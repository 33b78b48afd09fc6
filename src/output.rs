//! Status lines for the cssprite CLI.
//!
//! Lines look like Cargo's: a bold, coloured verb right-aligned in a fixed
//! column, then the message. They go to stderr so `check --json` can own
//! stdout.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

/// Width of the right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Colour of a status verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Progress,
    Note,
    Caution,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Progress => "\x1b[1;32m",
            Tone::Note => "\x1b[1;36m",
            Tone::Caution => "\x1b[1;33m",
        }
    }
}

/// Terminal-aware status printer.
///
/// Colour is used only when stderr is a terminal. A quiet printer drops
/// every status line; errors are rendered by the caller.
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Work in progress, e.g. `    Spriting css/app.css`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    /// A finished step.
    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Note, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Caution, verb, message);
    }

    /// Wrap `text` in the dim attribute when colour is on.
    pub fn dim(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("{DIM}{text}{RESET}")
    }

    fn format_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_WIDTH$}");
        if self.color {
            format!("{}{verb}{RESET} {message}", tone.ansi())
        } else {
            format!("{verb} {message}")
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        if self.quiet {
            return;
        }
        let line = self.format_line(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// `"1 sprite"`, `"3 sprites"`.
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let noun = if n == 1 { singular } else { pluralized };
    format!("{n} {noun}")
}

/// `path` relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
