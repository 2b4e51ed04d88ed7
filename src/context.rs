// src/context.rs

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The context handed to every entry routine: where the command was launched
/// from and the output channels it should write to.
pub struct ExecutionContext<'a> {
    current_path: PathBuf,
    standard_output: &'a mut dyn Write,
    error_output: &'a mut dyn Write,
}

impl<'a> ExecutionContext<'a> {
    /// Creates a context rooted at `current_path`, writing to the given channels.
    pub fn new(
        current_path: impl Into<PathBuf>,
        standard_output: &'a mut dyn Write,
        error_output: &'a mut dyn Write,
    ) -> Self {
        Self {
            current_path: current_path.into(),
            standard_output,
            error_output,
        }
    }

    /// The working directory the command was launched from.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Standard output of the command.
    pub fn stdout(&mut self) -> &mut dyn Write {
        &mut *self.standard_output
    }

    /// Error output of the command.
    pub fn stderr(&mut self) -> &mut dyn Write {
        &mut *self.error_output
    }

    /// Flushes both output channels.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.standard_output.flush()?;
        self.error_output.flush()
    }
}

impl fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("current_path", &self.current_path)
            .finish_non_exhaustive()
    }
}
