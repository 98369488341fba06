//! Fluent API for configuring and running `pack build`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use occam_common::config::OccamConfig;
use occam_common::constants::PACK_BINARY;
use occam_common::log::BuildLog;
use occam_docker::{DockerImageClient, Image, ImageClient};
use occam_exec::{Executable, Execution, ProcessExecutable};

use crate::error::PackError;

/// Entry point wrapping the `pack` CLI.
///
/// Options that apply to every `pack` subcommand live here; build options
/// live on [`PackBuild`], reached through the `build` field.
#[derive(Debug, Clone)]
pub struct Pack {
    /// Settings for `pack build`.
    pub build: PackBuild,
}

impl Pack {
    /// Creates a helper that runs `pack` and `docker` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_collaborators(
            Arc::new(ProcessExecutable::new(PACK_BINARY)),
            Arc::new(DockerImageClient::new()),
        )
    }

    /// Creates a helper that runs the binaries named in `config`.
    #[must_use]
    pub fn from_config(config: &OccamConfig) -> Self {
        Self::with_collaborators(
            Arc::new(ProcessExecutable::new(config.pack_binary.clone())),
            Arc::new(DockerImageClient::from_config(config)),
        )
    }

    fn with_collaborators(
        executable: Arc<dyn Executable>,
        image_client: Arc<dyn ImageClient>,
    ) -> Self {
        Self {
            build: PackBuild {
                executable,
                image_client,
                verbose: false,
                no_color: false,
                buildpacks: Vec::new(),
                network: String::new(),
                builder: String::new(),
                clear_cache: false,
                env: HashMap::new(),
                no_pull: false,
            },
        }
    }

    /// Replaces the executable used to run `pack`.
    #[must_use]
    pub fn with_executable(mut self, executable: Arc<dyn Executable>) -> Self {
        self.build.executable = executable;
        self
    }

    /// Replaces the client used to inspect built images.
    #[must_use]
    pub fn with_image_client(mut self, client: Arc<dyn ImageClient>) -> Self {
        self.build.image_client = client;
        self
    }

    /// Passes `--verbose` to `pack`.
    #[must_use]
    pub const fn with_verbose(mut self) -> Self {
        self.build.verbose = true;
        self
    }

    /// Passes `--no-color` to `pack`.
    #[must_use]
    pub const fn with_no_color(mut self) -> Self {
        self.build.no_color = true;
        self
    }
}

impl Default for Pack {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for a single `pack build` invocation.
///
/// Unset values are left off the command line entirely. Nothing is
/// validated here; `pack` is the judge of whether a builder or network
/// exists.
#[derive(Clone)]
pub struct PackBuild {
    executable: Arc<dyn Executable>,
    image_client: Arc<dyn ImageClient>,

    verbose: bool,
    no_color: bool,

    buildpacks: Vec<String>,
    network: String,
    builder: String,
    clear_cache: bool,
    env: HashMap<String, String>,
    no_pull: bool,
}

impl fmt::Debug for PackBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackBuild")
            .field("verbose", &self.verbose)
            .field("no_color", &self.no_color)
            .field("buildpacks", &self.buildpacks)
            .field("network", &self.network)
            .field("builder", &self.builder)
            .field("clear_cache", &self.clear_cache)
            .field("env", &self.env)
            .field("no_pull", &self.no_pull)
            .finish_non_exhaustive()
    }
}

impl PackBuild {
    /// Appends buildpacks, keeping the order given and any duplicates.
    #[must_use]
    pub fn with_buildpacks<I, S>(mut self, buildpacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buildpacks.extend(buildpacks.into_iter().map(Into::into));
        self
    }

    /// Sets the network build containers attach to.
    #[must_use]
    pub fn with_network(mut self, name: impl Into<String>) -> Self {
        self.network = name.into();
        self
    }

    /// Sets the builder image.
    #[must_use]
    pub fn with_builder(mut self, name: impl Into<String>) -> Self {
        self.builder = name.into();
        self
    }

    /// Discards cached layers from previous builds.
    #[must_use]
    pub const fn with_clear_cache(mut self) -> Self {
        self.clear_cache = true;
        self
    }

    /// Replaces the build-time environment with `env`.
    #[must_use]
    pub fn with_env<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = env
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Uses only locally available images.
    #[must_use]
    pub const fn with_no_pull(mut self) -> Self {
        self.no_pull = true;
        self
    }

    /// Returns the arguments `execute` passes to `pack` for an image `name`
    /// built from the source at `path`.
    #[must_use]
    pub fn args(&self, name: &str, path: &Path) -> Vec<String> {
        let mut args = vec!["build".to_string(), name.to_string()];

        if self.verbose {
            args.push("--verbose".into());
        }

        if self.no_color {
            args.push("--no-color".into());
        }

        args.push("--path".into());
        args.push(path.to_string_lossy().into_owned());

        for buildpack in &self.buildpacks {
            args.push("--buildpack".into());
            args.push(buildpack.clone());
        }

        if !self.network.is_empty() {
            args.push("--network".into());
            args.push(self.network.clone());
        }

        if !self.builder.is_empty() {
            args.push("--builder".into());
            args.push(self.builder.clone());
        }

        if self.clear_cache {
            args.push("--clear-cache".into());
        }

        // HashMap iteration order is unspecified; sort for a stable command line.
        let mut variables: Vec<String> = self
            .env
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        variables.sort();
        for variable in variables {
            args.push("--env".into());
            args.push(variable);
        }

        if self.no_pull {
            args.push("--no-pull".into());
        }

        args
    }

    /// Builds image `name` from the source at `path`, then inspects it.
    ///
    /// Both stdout and stderr of `pack` are captured into one [`BuildLog`],
    /// which is returned on success and attached to every error.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Process`] if `pack` cannot be run or exits
    /// unsuccessfully, and [`PackError::Inspect`] if the built image cannot
    /// be inspected.
    pub fn execute(
        &self,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<(Image, BuildLog), PackError> {
        let args = self.args(name, path.as_ref());
        tracing::info!(name, path = %path.as_ref().display(), "running pack build");
        tracing::debug!(?args, "pack build arguments");

        let logs = BuildLog::new();
        let mut stdout = logs.clone();
        let mut stderr = logs.clone();
        let result = self.executable.execute(Execution {
            args,
            stdout: Some(&mut stdout),
            stderr: Some(&mut stderr),
            ..Execution::default()
        });
        if let Err(source) = result {
            tracing::warn!(name, error = %source, "pack build failed");
            return Err(PackError::Process { source, logs });
        }

        match self.image_client.inspect(name) {
            Ok(image) => {
                tracing::info!(name, id = %image.id, "pack build succeeded");
                Ok((image, logs))
            }
            Err(source) => {
                tracing::warn!(name, error = %source, "built image could not be inspected");
                Err(PackError::Inspect { source, logs })
            }
        }
    }
}
