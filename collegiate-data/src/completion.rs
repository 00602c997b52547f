//! Text completion through a local command-line model runner.
//!
//! [`ProcessCompletionService`] writes the prompt to the standard input of a
//! configured command and returns its standard output. The default command
//! is `ollama run llama3.1`.
//!
//! # Example
//!
//! ```no_run
//! use collegiate_core::TextCompletionService;
//! use collegiate_data::completion::{ProcessCompletionConfig, ProcessCompletionService};
//!
//! let service = ProcessCompletionService::new(ProcessCompletionConfig::default());
//! let reply = service.complete("Say hello in five words.")?;
//! println!("{reply}");
//! # Ok::<(), collegiate_core::CompletionError>(())
//! ```

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use collegiate_core::{CompletionError, TextCompletionService};

/// Default completion program.
pub const DEFAULT_PROGRAM: &str = "ollama";

/// Default arguments passed to [`DEFAULT_PROGRAM`].
pub const DEFAULT_ARGS: [&str; 2] = ["run", "llama3.1"];

/// Command used to produce completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCompletionConfig {
    /// Program to execute, resolved through `PATH`.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl Default for ProcessCompletionConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
            args: DEFAULT_ARGS.map(str::to_owned).to_vec(),
        }
    }
}

impl ProcessCompletionConfig {
    /// Create a configuration running `program` without arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Replace the argument list.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Completion service that runs one process per prompt.
#[derive(Debug, Clone, Default)]
pub struct ProcessCompletionService {
    config: ProcessCompletionConfig,
}

impl ProcessCompletionService {
    /// Create a service running the configured command.
    #[must_use]
    pub const fn new(config: ProcessCompletionConfig) -> Self {
        Self { config }
    }

    /// Command this service runs.
    #[must_use]
    pub const fn config(&self) -> &ProcessCompletionConfig {
        &self.config
    }
}

impl TextCompletionService for ProcessCompletionService {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let command = self.config.command_line();
        let io_error = |err: io::Error| CompletionError::Io {
            command: command.clone(),
            message: err.to_string(),
        };

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| CompletionError::Spawn {
                command: command.clone(),
                message: err.to_string(),
            })?;
        log::debug!("running completion command '{command}'");

        // Stdin must be written while stdout drains, or a child that fills
        // its stdout pipe blocks forever.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || {
                stdin.map_or(Ok(()), |mut pipe| pipe.write_all(prompt.as_bytes()))
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });
        let output = output.map_err(io_error)?;
        // A child may exit without reading all of its input.
        written
            .or_else(|err| {
                if err.kind() == io::ErrorKind::BrokenPipe {
                    Ok(())
                } else {
                    Err(err)
                }
            })
            .map_err(io_error)?;

        if !output.status.success() {
            return Err(CompletionError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        String::from_utf8(output.stdout).map_err(|_| CompletionError::InvalidOutput { command })
    }
}
