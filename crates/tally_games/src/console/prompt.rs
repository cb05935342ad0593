//! Prompt and output primitives shared by every console screen.

use crossterm::style::Stylize;
use std::io::{BufRead, Write};
use tally_tictactoe::InputError;
use tracing::{debug, instrument, warn};

/// Shown for empty or unparsable input.
pub const INVALID_INPUT: &str = "Invalid input, try again...";
/// Shown for menu numbers out of range.
pub const INVALID_SELECTION: &str = "Invalid selection, try again...";

/// How a line of output is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Section titles.
    Header,
    /// Announcements.
    Message,
    /// Problems the user should fix.
    Error,
    /// Everything else.
    Plain,
}

/// Reads answers and writes styled output.
///
/// The quit keyword, compared case-insensitively, and end of input both
/// turn into [`InputError::Quit`] at every prompt.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
    quit_keyword: String,
    color: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over an input and an output stream.
    pub fn new(input: R, output: W, quit_keyword: impl Into<String>, color: bool) -> Self {
        Self {
            input,
            output,
            quit_keyword: quit_keyword.into(),
            color,
        }
    }

    /// The quit keyword.
    pub fn quit_keyword(&self) -> &str {
        &self.quit_keyword
    }

    /// The output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the prompter, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line in the given tone.
    pub fn say(&mut self, tone: Tone, text: &str) {
        let styled = if self.color {
            match tone {
                Tone::Header => text.bold().cyan().to_string(),
                Tone::Message => text.green().to_string(),
                Tone::Error => text.red().to_string(),
                Tone::Plain => text.to_string(),
            }
        } else {
            text.to_string()
        };
        self.write(&format!("{styled}\n"));
    }

    /// A blank line.
    pub fn blank(&mut self) {
        self.write("\n");
    }

    /// A section title between rules.
    pub fn header(&mut self, text: &str) {
        let rule = "=".repeat(text.chars().count() + 4);
        self.blank();
        self.say(Tone::Header, &rule);
        self.say(Tone::Header, &format!("  {text}"));
        self.say(Tone::Header, &rule);
    }

    /// An announcement.
    pub fn message(&mut self, text: &str) {
        self.blank();
        self.say(Tone::Message, text);
    }

    /// An error the user can recover from.
    pub fn error(&mut self, text: &str) {
        self.say(Tone::Error, text);
    }

    /// Prints `prompt: ` and reads one non-empty trimmed line.
    ///
    /// Empty lines are rejected and asked again.
    ///
    /// # Errors
    ///
    /// [`InputError::Quit`] on the quit keyword, end of input, or a read
    /// failure.
    #[instrument(skip(self))]
    pub fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        loop {
            self.write(&format!("{prompt}: "));
            self.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    debug!("End of input");
                    return Err(InputError::Quit);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Console read failed");
                    return Err(InputError::Quit);
                }
            }

            let answer = line.trim();
            if answer.eq_ignore_ascii_case(&self.quit_keyword) {
                debug!("Quit keyword entered");
                return Err(InputError::Quit);
            }
            if answer.is_empty() {
                self.error(INVALID_INPUT);
                continue;
            }
            return Ok(answer.to_string());
        }
    }

    /// Shows a numbered menu and returns the zero-based index chosen.
    ///
    /// # Errors
    ///
    /// [`InputError::Quit`] as for [`Prompter::ask`].
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub fn choose<T: AsRef<str>>(
        &mut self,
        prompt: &str,
        items: &[T],
    ) -> Result<usize, InputError> {
        self.blank();
        for (number, item) in items.iter().enumerate() {
            let line = format!("{}. {}", number + 1, item.as_ref());
            self.say(Tone::Plain, &line);
        }
        self.blank();

        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<usize>() {
                Ok(number) if (1..=items.len()).contains(&number) => return Ok(number - 1),
                Ok(_) => self.error(INVALID_SELECTION),
                Err(_) => self.error(INVALID_INPUT),
            }
        }
    }

    /// Asks a yes/no question; accepts `y`, `yes`, `n`, `no` in any case.
    ///
    /// # Errors
    ///
    /// [`InputError::Quit`] as for [`Prompter::ask`].
    #[instrument(skip(self))]
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, InputError> {
        loop {
            let answer = self.ask(prompt)?.to_lowercase();
            match answer.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.error(INVALID_INPUT),
            }
        }
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.output.write_all(text.as_bytes()) {
            warn!(error = %e, "Console write failed");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.output.flush() {
            warn!(error = %e, "Console flush failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new(), "quit", false)
    }

    fn printed(prompter: Prompter<&[u8], Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_ask_skips_blank_lines() {
        let mut p = prompter("\n  \nAnn\n");
        assert_eq!(p.ask("Name").unwrap(), "Ann");
        assert_eq!(printed(p).matches(INVALID_INPUT).count(), 2);
    }

    #[test]
    fn test_quit_keyword_any_case_and_eof() {
        assert_eq!(prompter("QUIT\n").ask("Name"), Err(InputError::Quit));
        assert_eq!(prompter(" quit \n").ask("Name"), Err(InputError::Quit));
        assert_eq!(prompter("").ask("Name"), Err(InputError::Quit));
    }

    #[test]
    fn test_choose_validates_range() {
        let mut p = prompter("0\nthree\n4\n2\n");
        let index = p.choose("Pick", &["a", "b", "c"]).unwrap();
        assert_eq!(index, 1);
        let out = printed(p);
        assert!(out.contains("1. a\n2. b\n3. c\n"));
        assert_eq!(out.matches(INVALID_SELECTION).count(), 2);
        assert_eq!(out.matches(INVALID_INPUT).count(), 1);
    }

    #[test]
    fn test_confirm_answers() {
        assert_eq!(prompter("Y\n").confirm("Again"), Ok(true));
        assert_eq!(prompter("yes\n").confirm("Again"), Ok(true));
        assert_eq!(prompter("maybe\nNo\n").confirm("Again"), Ok(false));
        assert_eq!(prompter("maybe\n").confirm("Again"), Err(InputError::Quit));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let mut p = prompter("");
        p.header("GAME OVER");
        p.error("bad");
        let out = printed(p);
        assert!(!out.contains('\u{1b}'));
        assert!(out.contains("  GAME OVER\n"));
    }

    #[test]
    fn test_colour_output_is_styled() {
        let mut p = Prompter::new("".as_bytes(), Vec::new(), "quit", true);
        p.header("STATS");
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("STATS"));
    }
}
