//! Line-based prompting over any reader/writer pair.
//!
//! The binary wires this to locked stdin/stdout; tests drive it with a
//! `Cursor` and a `Vec<u8>`.

use std::io::{BufRead, Write};

use crate::config::Vocabulary;
use crate::error::{AppError, EXIT_INPUT};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a block of text followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")
            .and_then(|()| self.output.flush())
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write output: {e}")))
    }

    /// Ask until the answer is in `vocabulary`.
    ///
    /// Answers are trimmed and lower-cased before lookup. There is no retry
    /// limit; only a closed input stream ends the loop early.
    pub fn choose<T: Copy>(
        &mut self,
        prompt: &str,
        retry_prompt: &str,
        vocabulary: &Vocabulary<T>,
    ) -> Result<T, AppError> {
        self.say(prompt)?;
        loop {
            let Some(answer) = self.read_answer()? else {
                return Err(AppError::new(
                    EXIT_INPUT,
                    format!("Input closed before a valid {} was entered.", vocabulary.subject()),
                ));
            };

            if let Some(value) = vocabulary.lookup(&answer) {
                return Ok(value);
            }

            log::debug!("rejected {} answer {answer:?}", vocabulary.subject());
            self.say(retry_prompt)?;
        }
    }

    /// Ask a yes/no question. Only `yes` counts as affirmative; a closed input
    /// stream counts as "no".
    pub fn confirm(&mut self, question: &str) -> Result<bool, AppError> {
        self.say(question)?;
        Ok(self.read_answer()?.is_some_and(|answer| answer == "yes"))
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Result<Option<String>, AppError> {
        let mut line = Vec::new();
        let bytes = self
            .input
            .read_until(b'\n', &mut line)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD, which no vocabulary entry contains.
        Ok(Some(String::from_utf8_lossy(&line).trim().to_ascii_lowercase()))
    }
}
