//! Errors raised while talking to the container runtime.

use occam_common::error::OccamError;
use thiserror::Error;

/// Failure inspecting or removing an image.
#[derive(Debug, Error)]
pub enum DockerError {
    /// The runtime CLI could not be run or exited unsuccessfully.
    #[error("failed to inspect docker image {reference}: {source}{}", stderr_suffix(.stderr))]
    Inspect {
        /// Image reference that was inspected.
        reference: String,
        /// Standard error written by the runtime CLI.
        stderr: String,
        /// Underlying execution error.
        #[source]
        source: OccamError,
    },

    /// The runtime reported no image for the reference.
    #[error("no such image: {reference}")]
    NotFound {
        /// Image reference that was inspected.
        reference: String,
    },

    /// The inspect output or an embedded label was not valid JSON.
    #[error("failed to parse inspect output for {reference}: {source}")]
    Parse {
        /// Image reference that was inspected.
        reference: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Removing the image failed.
    #[error("failed to remove docker image {reference}: {source}{}", stderr_suffix(.stderr))]
    Remove {
        /// Image reference that was removed.
        reference: String,
        /// Standard error written by the runtime CLI.
        stderr: String,
        /// Underlying execution error.
        #[source]
        source: OccamError,
    },
}

/// Formats captured stderr as a `: <text>` suffix, or nothing when empty.
fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
