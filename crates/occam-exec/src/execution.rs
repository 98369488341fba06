//! Description of a single invocation and the trait that performs it.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use occam_common::error::Result;

/// A single invocation of an [`Executable`].
///
/// Output sinks are optional. When set, everything the process writes to
/// the corresponding stream is copied into the sink as it arrives, in
/// addition to being captured in [`ExecOutput`].
#[derive(Default)]
pub struct Execution<'a> {
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory; inherits the caller's when `None`.
    pub dir: Option<PathBuf>,
    /// Extra environment variables layered over the inherited environment.
    pub env: Vec<(String, String)>,
    /// Sink receiving standard output.
    pub stdout: Option<&'a mut (dyn Write + Send)>,
    /// Sink receiving standard error.
    pub stderr: Option<&'a mut (dyn Write + Send)>,
}

impl<'a> Execution<'a> {
    /// Creates an execution with the given arguments and no sinks.
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Adds an environment variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Directs standard output into `sink`.
    #[must_use]
    pub fn stdout(mut self, sink: &'a mut (dyn Write + Send)) -> Self {
        self.stdout = Some(sink);
        self
    }

    /// Directs standard error into `sink`.
    #[must_use]
    pub fn stderr(mut self, sink: &'a mut (dyn Write + Send)) -> Self {
        self.stderr = Some(sink);
        self
    }
}

impl fmt::Debug for Execution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Execution")
            .field("args", &self.args)
            .field("dir", &self.dir)
            .field("env", &self.env)
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .finish()
    }
}

/// Output captured from a completed execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
}

/// Something that can run a program with arguments.
pub trait Executable: Send + Sync {
    /// Runs the program described by `execution` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be launched or exits with a
    /// non-zero status.
    fn execute(&self, execution: Execution<'_>) -> Result<ExecOutput>;
}
