//! # occam-exec
//!
//! Runs external tools on behalf of the rest of the workspace.
//!
//! - [`Executable`](execution::Executable): the narrow seam every caller
//!   depends on, so tests can substitute a fake.
//! - [`ProcessExecutable`](process::ProcessExecutable): the real
//!   implementation, which resolves a binary on `PATH` and streams its output
//!   into caller-provided sinks.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod execution;
pub mod process;

pub use execution::{ExecOutput, Executable, Execution};
pub use process::ProcessExecutable;
