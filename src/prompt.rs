//! Interactive yes/no and free-text prompts.
//!
//! The resolver only sees the `Confirmer` trait, so resolution runs the same
//! way against a terminal, a scripted reader in tests, or `--yes` batch mode.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::detector::Ecosystem;

/// Decides whether a suggested command may be saved and run.
pub trait Confirmer {
    fn confirm_suggestion(&mut self, ecosystem: Ecosystem, verb: &str, command: &str)
    -> Result<bool>;
}

impl<C: Confirmer + ?Sized> Confirmer for &mut C {
    fn confirm_suggestion(
        &mut self,
        ecosystem: Ecosystem,
        verb: &str,
        command: &str,
    ) -> Result<bool> {
        (**self).confirm_suggestion(ecosystem, verb, command)
    }
}

/// Accepts every suggestion without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm_suggestion(
        &mut self,
        ecosystem: Ecosystem,
        verb: &str,
        command: &str,
    ) -> Result<bool> {
        crate::log_info!("auto-accepting {ecosystem} suggestion for '{verb}': {command}");
        Ok(true)
    }
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write without a trailing newline and flush.
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        write!(self.output, "{}", text.as_ref())?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one trimmed line; `None` when input is exhausted.
    pub fn read_answer(&mut self, message: &str) -> Result<Option<String>> {
        self.say(message)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `read_answer`, but end of input reads as an empty answer.
    pub fn ask_line(&mut self, message: &str) -> Result<String> {
        Ok(self.read_answer(message)?.unwrap_or_default())
    }

    /// `y`/`yes` -> true, `n`/`no` -> false, empty -> `default`, anything else -> false.
    pub fn ask_yes_no(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.ask_line(&format!("{message} ({hint}): "))?;
        Ok(parse_yes_no(&answer).unwrap_or(if answer.is_empty() {
            default
        } else {
            false
        }))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Classify a yes/no answer; `None` for empty or free text.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Confirmer for Prompt<R, W> {
    fn confirm_suggestion(
        &mut self,
        ecosystem: Ecosystem,
        verb: &str,
        command: &str,
    ) -> Result<bool> {
        self.say(format!(
            "\nNo mapping found for '{verb}' in this project.\nDetected: {ecosystem} project\n\n"
        ))?;
        // Only a real answer may accept; closed stdin declines.
        let Some(answer) = self.read_answer(&format!("Run \"{command}\"? (Y/n): "))? else {
            self.say("\n")?;
            crate::log_info!("no answer on stdin, declining '{command}' (use --yes to accept)");
            return Ok(false);
        };
        Ok(parse_yes_no(&answer).unwrap_or(answer.is_empty()))
    }
}
