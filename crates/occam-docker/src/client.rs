//! Image client seam and its docker CLI implementation.

use std::sync::Arc;

use occam_common::config::OccamConfig;
use occam_common::constants::DOCKER_BINARY;
use occam_exec::{Executable, Execution, ProcessExecutable};

use crate::error::DockerError;
use crate::image::Image;

/// Looks up metadata for an image reference.
pub trait ImageClient: Send + Sync {
    /// Returns metadata for `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or the runtime is
    /// unreachable.
    fn inspect(&self, reference: &str) -> Result<Image, DockerError>;
}

/// [`ImageClient`] that shells out to the `docker` CLI.
#[derive(Clone)]
pub struct DockerImageClient {
    executable: Arc<dyn Executable>,
}

impl std::fmt::Debug for DockerImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerImageClient").finish_non_exhaustive()
    }
}

impl DockerImageClient {
    /// Creates a client that runs `docker` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_executable(Arc::new(ProcessExecutable::new(DOCKER_BINARY)))
    }

    /// Creates a client that runs the configured docker binary.
    #[must_use]
    pub fn from_config(config: &OccamConfig) -> Self {
        Self::with_executable(Arc::new(ProcessExecutable::new(
            config.docker_binary.clone(),
        )))
    }

    /// Creates a client that runs docker commands through `executable`.
    #[must_use]
    pub fn with_executable(executable: Arc<dyn Executable>) -> Self {
        Self { executable }
    }

    /// Force-removes `reference` from the local image store.
    ///
    /// # Errors
    ///
    /// Returns [`DockerError::Remove`] if the docker CLI fails.
    pub fn remove(&self, reference: &str) -> Result<(), DockerError> {
        tracing::info!(reference, "removing image");
        let mut stderr = Vec::new();
        let result = self.executable.execute(
            Execution::new(["image", "remove", reference, "--force"]).stderr(&mut stderr),
        );
        match result {
            Ok(_) => Ok(()),
            Err(source) => Err(DockerError::Remove {
                reference: reference.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
                source,
            }),
        }
    }
}

impl Default for DockerImageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageClient for DockerImageClient {
    fn inspect(&self, reference: &str) -> Result<Image, DockerError> {
        tracing::debug!(reference, "inspecting image");
        let mut stderr = Vec::new();
        let result = self
            .executable
            .execute(Execution::new(["image", "inspect", reference]).stderr(&mut stderr));
        let output = match result {
            Ok(output) => output,
            Err(source) => {
                return Err(DockerError::Inspect {
                    reference: reference.to_string(),
                    stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
                    source,
                });
            }
        };
        Image::from_inspect_output(reference, &output.stdout)
    }
}
