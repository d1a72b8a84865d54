//! Line-oriented confirmer
//!
//! Reads answers one line at a time from any reader. Used when stdin is not a
//! terminal (pipes, scripted input) and in tests.

use std::io::{BufRead, Write};
use std::sync::Mutex;

use crate::domain::ports::Confirmer;
use crate::error::{KeelError, KeelResult};

/// Consecutive read errors tolerated before giving up.
pub const MAX_INPUT_FAILURES: usize = 3;

/// Interpret one answer line.
///
/// Empty input is affirmative. Otherwise only the first character counts:
/// `y` means yes, `n` means no, anything else is not an answer.
pub fn parse_answer(line: &str) -> Option<bool> {
    let answer = line.trim().to_lowercase();
    match answer.chars().next() {
        None | Some('y') => Some(true),
        Some('n') => Some(false),
        Some(_) => None,
    }
}

/// Confirmer that prompts on a writer and reads answers from a reader.
///
/// Invalid answers re-prompt without limit. End of input, or
/// `MAX_INPUT_FAILURES` read errors in a row, end the exchange with
/// `KeelError::ConfirmationUnavailable`.
pub struct LineConfirmer<R, W> {
    io: Mutex<(R, W)>,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }

    /// Recover the underlying reader and writer
    pub fn into_inner(self) -> (R, W) {
        match self.io.into_inner() {
            Ok(io) => io,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl LineConfirmer<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr, read from stdin
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn confirm(&self, prompt: &str) -> KeelResult<bool> {
        let mut guard = self
            .io
            .lock()
            .map_err(|_| KeelError::ConfirmationUnavailable("prompt state poisoned".into()))?;
        let (input, output) = &mut *guard;
        let mut failures = 0;

        loop {
            let _ = write!(output, "{} (Y/n): ", prompt);
            let _ = output.flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    let _ = writeln!(output);
                    return Err(KeelError::ConfirmationUnavailable(
                        "input closed before an answer was given".into(),
                    ));
                }
                Ok(_) => {
                    failures = 0;
                    match parse_answer(&line) {
                        Some(answer) => return Ok(answer),
                        None => {
                            let _ = writeln!(output, "Invalid input. Please try again.");
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    tracing::debug!(error = %e, failures, "failed to read confirmation answer");
                    if failures >= MAX_INPUT_FAILURES {
                        return Err(KeelError::ConfirmationUnavailable(e.to_string()));
                    }
                    let _ = writeln!(
                        output,
                        "Could not read answer: {}. Please enter a valid answer.",
                        e
                    );
                }
            }
        }
    }
}
