//! Interactive prompt session.
//!
//! A [`Prompter`] owns both halves of the operator conversation for the
//! duration of a run: it is constructed once (over locked stdio in the
//! binary, over in-memory buffers in tests) and released when the run
//! ends. Invalid answers re-prompt in an explicit loop; the only fatal
//! condition is the input stream closing mid-session.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

/// A session-scoped interactive prompter.
///
/// Generic over the input/output streams so the orchestrator can be
/// driven by scripted input in tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::StdoutLock<'static>> {
    /// Create a prompter over locked stdio for the whole session.
    pub fn stdio() -> Self {
        Prompter {
            input: io::stdin().lock(),
            output: io::stdout().lock(),
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print a line of non-prompt output (headers, previews).
    pub fn say(&mut self, msg: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", msg).context("failed to write to interactive output")?;
        Ok(())
    }

    /// Ask a free-text question; an empty answer yields `default`
    /// (which may itself be empty for optional fields).
    pub fn text(&mut self, question: &str, default: &str) -> Result<String> {
        let suffix = if default.is_empty() {
            String::new()
        } else {
            format!(" [{}]", default)
        };
        write!(self.output, "{}{}: ", question, suffix)
            .context("failed to write to interactive output")?;
        self.output.flush()?;

        let answer = self.read_line()?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Ask a free-text question, re-prompting until the answer (or the
    /// default) is non-empty.
    pub fn text_required(&mut self, question: &str, default: &str) -> Result<String> {
        loop {
            let answer = self.text(question, default)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    /// Ask a yes/no question; an empty answer yields the default.
    pub fn yes_no(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{} ({}): ", question, hint)
                .context("failed to write to interactive output")?;
            self.output.flush()?;

            let answer = self.read_line()?.to_lowercase();
            match answer.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {}
            }
        }
    }

    /// Present a numbered menu and return the chosen index.
    ///
    /// Out-of-range or non-numeric answers redisplay the question and
    /// the full menu until a valid selection is made.
    pub fn choose(&mut self, question: &str, items: &[String]) -> Result<usize> {
        loop {
            writeln!(self.output, "{}", question)
                .context("failed to write to interactive output")?;
            for (index, item) in items.iter().enumerate() {
                writeln!(self.output, "  {}) {}", index + 1, item)
                    .context("failed to write to interactive output")?;
            }

            let answer = self.text_required("Select an option", "")?;
            if let Ok(n) = answer.parse::<usize>() {
                if n >= 1 && n <= items.len() {
                    return Ok(n - 1);
                }
            }
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read from interactive input")?;
        if n == 0 {
            bail!("interactive input stream closed");
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_text_returns_default_on_empty() {
        let mut p = scripted("\n");
        assert_eq!(p.text("Namespace", "oma").unwrap(), "oma");
    }

    #[test]
    fn test_text_trims_answer() {
        let mut p = scripted("  readme  \n");
        assert_eq!(p.text("Name", "").unwrap(), "readme");
    }

    #[test]
    fn test_text_required_reprompts_until_nonempty() {
        let mut p = scripted("\n\nvalue\n");
        assert_eq!(p.text_required("Name", "").unwrap(), "value");
    }

    #[test]
    fn test_yes_no_defaults_and_variants() {
        let mut p = scripted("\nyes\nN\nbogus\ny\n");
        assert!(p.yes_no("Extract?", true).unwrap());
        assert!(p.yes_no("Extract?", false).unwrap());
        assert!(!p.yes_no("Extract?", true).unwrap());
        // "bogus" is rejected, then "y" accepted
        assert!(p.yes_no("Extract?", false).unwrap());
    }

    #[test]
    fn test_choose_reprompts_on_invalid_index() {
        let items = vec!["File".to_string(), "Archive".to_string()];
        let mut p = scripted("0\nthree\n2\n");
        assert_eq!(p.choose("Kind?", &items).unwrap(), 1);
    }

    #[test]
    fn test_choose_redisplays_menu_on_invalid_answer() {
        let items = vec!["File".to_string(), "Archive".to_string()];
        let mut p = scripted("9\n2\n");
        assert_eq!(p.choose("Kind?", &items).unwrap(), 1);

        let out = String::from_utf8(p.output.clone()).unwrap();
        assert_eq!(out.matches("Kind?").count(), 2);
        assert_eq!(out.matches("  1) File").count(), 2);
        assert_eq!(out.matches("  2) Archive").count(), 2);
    }

    #[test]
    fn test_closed_input_is_fatal() {
        let mut p = scripted("");
        let err = p.text("Name", "").unwrap_err();
        assert!(err.to_string().contains("input stream closed"));
    }
}
