//! Errors returned by `pack build`.

use occam_common::error::OccamError;
use occam_common::log::BuildLog;
use occam_docker::DockerError;
use thiserror::Error;

/// A failed build. Every variant carries the build log so the output stays
/// available for diagnosis.
#[derive(Debug, Error)]
pub enum PackError {
    /// `pack build` could not be launched or exited unsuccessfully.
    #[error("failed to pack build: {source}")]
    Process {
        /// Underlying execution error.
        source: OccamError,
        /// Output captured before the failure.
        logs: BuildLog,
    },

    /// The build succeeded but the produced image could not be inspected.
    #[error("failed to pack build: {source}")]
    Inspect {
        /// Underlying inspection error.
        source: DockerError,
        /// Output of the successful build.
        logs: BuildLog,
    },
}

impl PackError {
    /// Returns the build log captured for this build.
    #[must_use]
    pub const fn logs(&self) -> &BuildLog {
        match self {
            Self::Process { logs, .. } | Self::Inspect { logs, .. } => logs,
        }
    }

    /// Consumes the error, returning the build log.
    #[must_use]
    pub fn into_logs(self) -> BuildLog {
        match self {
            Self::Process { logs, .. } | Self::Inspect { logs, .. } => logs,
        }
    }
}
