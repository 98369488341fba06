//! Executable backed by a real operating-system process.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use occam_common::error::{OccamError, Result};

use crate::execution::{ExecOutput, Executable, Execution};

/// Runs a named program found on `PATH` (or at an explicit path).
#[derive(Debug, Clone)]
pub struct ProcessExecutable {
    program: String,
}

impl ProcessExecutable {
    /// Creates an executable for `program`. The binary is resolved when it
    /// is first executed, not here.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| OccamError::NotFound {
            kind: "executable",
            id: self.program.clone(),
        })
    }
}

impl Executable for ProcessExecutable {
    fn execute(&self, execution: Execution<'_>) -> Result<ExecOutput> {
        let binary = self.resolve()?;
        tracing::debug!(program = %self.program, args = ?execution.args, "executing");

        let mut cmd = Command::new(&binary);
        let _ = cmd
            .args(&execution.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &execution.dir {
            let _ = cmd.current_dir(dir);
        }
        for (key, value) in &execution.env {
            let _ = cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|e| OccamError::Io {
            path: binary.clone(),
            source: e,
        })?;

        let io_error = |source: io::Error| OccamError::Io {
            path: binary.clone(),
            source,
        };
        let stdout_pipe = child
            .stdout
            .take()
            .ok_or_else(|| io_error(io::Error::other("stdout was not captured")))?;
        let stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| io_error(io::Error::other("stderr was not captured")))?;

        // Drain both pipes concurrently; a full pipe blocks the child.
        let Execution { stdout, stderr, .. } = execution;
        let (stdout, stderr) = std::thread::scope(|scope| {
            let out = scope.spawn(move || pump(stdout_pipe, stdout));
            let err = pump(stderr_pipe, stderr);
            let out = out
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdout reader panicked")));
            (out, err)
        });

        let status = child.wait().map_err(io_error)?;
        let stdout = stdout.map_err(io_error)?;
        let stderr = stderr.map_err(io_error)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            tracing::warn!(program = %self.program, code, "process exited unsuccessfully");
            return Err(OccamError::CommandFailed {
                program: self.program.clone(),
                code,
            });
        }

        Ok(ExecOutput { stdout, stderr })
    }
}

/// Copies `reader` to completion, teeing each chunk into `sink`.
fn pump(mut reader: impl Read, mut sink: Option<&mut (dyn Write + Send)>) -> io::Result<String> {
    let mut captured = Vec::new();
    let mut chunk = [0_u8; 8192];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        captured.extend_from_slice(&chunk[..n]);
        if let Some(sink) = sink.as_mut() {
            sink.write_all(&chunk[..n])?;
        }
    }
    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }
    Ok(String::from_utf8_lossy(&captured).into_owned())
}
