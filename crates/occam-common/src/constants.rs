//! Binary names, environment variable names, and well-known labels.

/// Default name of the Cloud Native Buildpacks CLI.
pub const PACK_BINARY: &str = "pack";

/// Default name of the container runtime CLI.
pub const DOCKER_BINARY: &str = "docker";

/// Environment variable overriding the `pack` binary.
pub const PACK_BINARY_ENV: &str = "OCCAM_PACK_BIN";

/// Environment variable overriding the `docker` binary.
pub const DOCKER_BINARY_ENV: &str = "OCCAM_DOCKER_BIN";

/// Image label written by the buildpacks lifecycle describing the
/// buildpacks and layers that contributed to an image.
pub const LIFECYCLE_METADATA_LABEL: &str = "io.buildpacks.lifecycle.metadata";
