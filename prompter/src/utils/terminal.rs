//! # Terminal Input Helper
//!
//! The prompt engine. [`Terminal::ask`] writes the prompt, reads one line,
//! checks it against the exit sentinels, casts it and runs the rule chain
//! (see [`crate::utils::sanitize`]). A rejected line prints its configured
//! message and is asked again, unless the request disables `repeat`.
//!
//! [`Terminal::collect`] keeps asking and gathers the accepted values until
//! a sentinel is typed, the `numInputs` budget runs out or `ask` gives up.
//!
//! A terminal owns its reader and writer, so tests and other front ends can
//! drive it with in-memory buffers; [`Terminal::stdio`] binds it to the
//! process stdin and stdout.
//!
//! ## Example
//! ```rust,no_run
//! use prompter::{Kind, Options, Request, Terminal};
//!
//! let request = Request::new(
//!     Kind::Int,
//!     Options::new()
//!         .output_text("Scan threads (1-16): ")
//!         .min(1)
//!         .max(16)
//!         .error_message("Pick a number between 1 and 16"),
//! )
//! .unwrap();
//!
//! let threads = Terminal::stdio().ask(&request).unwrap();
//! println!("Threads: {:?}", threads);
//! ```

use crate::config::{Kind, Request};
use crate::error::{ConfigError, PromptError, Result};
use crate::utils::sanitize::{DesiredType, Rejection, Sanitize, Value};
use std::{
    fs::File,
    io::{self, BufRead, Stdout, StdinLock, Write},
    path::PathBuf,
};
use tracing::{debug, trace};

/// A prompt engine bound to one input and one output.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// A terminal reading the locked process stdin and writing to stdout.
    pub fn stdio() -> Self {
        Terminal::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Terminal { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Asks until a line passes every check.
    ///
    /// Returns `Ok(None)` when an exit sentinel is typed, when the input ends,
    /// or after the first rejection if the request disables `repeat`.
    pub fn ask(&mut self, request: &Request) -> Result<Option<Value>> {
        let desired = DesiredType::from(request.kind());
        let filters = request.filters();

        loop {
            let Some(line) = self.read_line(request.prompt_text())? else {
                debug!("input closed");
                return Ok(None);
            };

            let outcome = match String::from_utf8(line) {
                Ok(answer) => {
                    if request.exit_sentinels().iter().any(|s| *s == answer) {
                        debug!(sentinel = %answer, "exit sentinel");
                        return Ok(None);
                    }
                    Sanitize::execute(&answer, desired, &filters)
                }
                // undecodable text is a bad answer, not a broken terminal
                Err(_) => Err(Rejection::Type(desired)),
            };

            match outcome {
                Ok(value) => return Ok(Some(value)),
                Err(rejection) => {
                    debug!(check = rejection.check().message_key(), %rejection, "input rejected");
                    if let Some(message) = request.options().message_for(rejection.check()) {
                        writeln!(self.output, "{}", message)?;
                    }
                    if !request.repeat() {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// Asks repeatedly and returns every accepted value, in order.
    ///
    /// A `numInputs` budget is checked before each read, so no line past the
    /// budget is consumed.
    pub fn collect(&mut self, request: &Request) -> Result<Vec<Value>> {
        let mut remaining = request.options().num_inputs;
        let mut values = Vec::new();

        while remaining != Some(0) {
            match self.ask(request)? {
                Some(value) => values.push(value),
                None => break,
            }
            if let Some(left) = remaining.as_mut() {
                *left -= 1;
            }
        }

        debug!(count = values.len(), "collection finished");
        Ok(values)
    }

    /// Asks for a file name and opens it with the request's mode.
    ///
    /// The returned handle is closed when dropped.
    pub fn ask_file(&mut self, request: &Request) -> Result<Option<File>> {
        if request.kind() != Kind::FileName {
            return Err(ConfigError::InvalidValue {
                option: "type",
                reason: format!("files are opened from filename requests, not {}", request.kind()),
            }
            .into());
        }

        let Some(name) = self.ask(request)?.and_then(Value::into_string) else {
            return Ok(None);
        };

        let path = PathBuf::from(name);
        let file = request
            .mode()
            .open_options()
            .open(&path)
            .map_err(|source| PromptError::Open {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "file opened");
        Ok(Some(file))
    }

    /// Writes the prompt and reads the raw bytes of one line, without its
    /// line ending. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<Vec<u8>>> {
        debug!(prompt, "prompting");
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        trace!(line = %String::from_utf8_lossy(&line).trim_end(), "line read");

        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
