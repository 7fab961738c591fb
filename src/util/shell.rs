//! Operator-facing status output.
//!
//! All non-interactive output goes through [`Shell`], which right-aligns
//! a colored semantic prefix before each message. Interactive prompts are
//! handled separately by [`crate::util::prompt::Prompter`], which owns
//! the input side of the session.

use std::fmt::Display;
use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// Semantic status prefixes for operator messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Downloading an artifact (cyan).
    Fetching,
    /// Computing a content digest (cyan).
    Hashing,
    /// Manifest rewritten on disk (green).
    Updated,
    /// Fatal error (red).
    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Fetching => "Fetching",
            Status::Hashing => "Hashing",
            Status::Updated => "Updated",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Updated => "\x1b[1;32m",
            Status::Fetching | Status::Hashing => "\x1b[1;36m",
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Prefix alignment width, matching cargo-style output.
const STATUS_WIDTH: usize = 12;

/// Central handle for status output.
#[derive(Debug)]
pub struct Shell {
    use_color: bool,
}

impl Shell {
    /// Create a shell, detecting TTY color support unless disabled.
    pub fn new(no_color: bool) -> Self {
        Shell {
            use_color: !no_color && io::stderr().is_terminal(),
        }
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message: `{status:>12} {message}`.
    pub fn status(&self, status: Status, msg: impl Display) {
        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print a fatal error message.
    pub fn error(&self, msg: impl Display) {
        self.status(Status::Error, msg);
    }

    /// Create a byte progress bar for a download.
    ///
    /// When the content length is unknown a spinner is used instead.
    pub fn bytes_progress(&self, msg: impl Display, total_bytes: Option<u64>) -> ProgressBar {
        let pb = match total_bytes {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg} {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        };
        pb.set_message(msg.to_string());
        pb
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(false)
    }
}
