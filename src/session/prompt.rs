use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Raw input that is not even the right kind of value. Ends the session.
    #[error("failed to read input: expected {expected}, got {found:?}")]
    Input {
        expected: &'static str,
        found: String,
    },
    #[error("failed to read input: expected {expected}, reached end of input")]
    EndOfInput { expected: &'static str },
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to render result: {0}")]
    Render(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Prompt/answer pair over any line reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `prompt` and reads answer lines until one parses and passes
    /// `validate`. A rejected value prints `error` and asks again; a parse
    /// failure is returned to the caller.
    pub fn ask<T, U, P, V>(
        &mut self,
        prompt: &str,
        error: &str,
        expected: &'static str,
        parse: P,
        validate: V,
    ) -> Result<U, SessionError>
    where
        P: Fn(&str) -> Option<T>,
        V: Fn(T) -> Option<U>,
    {
        self.ask_with(prompt, error, expected, false, parse, validate)
    }

    /// Like [`Console::ask`] for single-token answers: blank lines are
    /// skipped while waiting for the token.
    pub fn ask_token<T, U, P, V>(
        &mut self,
        prompt: &str,
        error: &str,
        expected: &'static str,
        parse: P,
        validate: V,
    ) -> Result<U, SessionError>
    where
        P: Fn(&str) -> Option<T>,
        V: Fn(T) -> Option<U>,
    {
        self.ask_with(prompt, error, expected, true, parse, validate)
    }

    fn ask_with<T, U, P, V>(
        &mut self,
        prompt: &str,
        error: &str,
        expected: &'static str,
        skip_blank: bool,
        parse: P,
        validate: V,
    ) -> Result<U, SessionError>
    where
        P: Fn(&str) -> Option<T>,
        V: Fn(T) -> Option<U>,
    {
        loop {
            writeln!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = self.read_answer(expected)?;
            while skip_blank && line.trim().is_empty() {
                line = self.read_answer(expected)?;
            }
            let value = match parse(&line) {
                Some(value) => value,
                None => {
                    return Err(SessionError::Input {
                        expected,
                        found: line,
                    })
                }
            };
            if let Some(accepted) = validate(value) {
                writeln!(self.output)?;
                return Ok(accepted);
            }
            writeln!(self.output, "ERROR: {}. Please try again.", error)?;
        }
    }

    fn read_answer(&mut self, expected: &'static str) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::EndOfInput { expected });
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Parser for a single numeric token, surrounding whitespace allowed.
pub fn number<T: FromStr>(text: &str) -> Option<T> {
    text.trim().parse().ok()
}
