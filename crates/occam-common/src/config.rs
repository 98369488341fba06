//! Global configuration model for occam.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DOCKER_BINARY, DOCKER_BINARY_ENV, PACK_BINARY, PACK_BINARY_ENV};
use crate::error::{OccamError, Result};

/// Root configuration naming the external tools occam drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OccamConfig {
    /// Name or path of the `pack` binary.
    pub pack_binary: String,
    /// Name or path of the `docker` binary.
    pub docker_binary: String,
}

impl Default for OccamConfig {
    fn default() -> Self {
        Self {
            pack_binary: PACK_BINARY.to_string(),
            docker_binary: DOCKER_BINARY.to_string(),
        }
    }
}

impl OccamConfig {
    /// Returns the default configuration with `OCCAM_PACK_BIN` and
    /// `OCCAM_DOCKER_BIN` applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads `path` when given, otherwise starts from the defaults, then
    /// applies `OCCAM_PACK_BIN` and `OCCAM_DOCKER_BIN`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded.
    pub fn load_or_env(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::load(path)?.with_env_overrides()),
            None => Ok(Self::from_env()),
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// names an empty binary.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OccamError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both binaries are named.
    ///
    /// # Errors
    ///
    /// Returns [`OccamError::Config`] if `pack_binary` or `docker_binary` is
    /// empty.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("pack_binary", &self.pack_binary),
            ("docker_binary", &self.docker_binary),
        ] {
            if value.trim().is_empty() {
                return Err(OccamError::Config {
                    message: format!("{field} must not be empty"),
                });
            }
        }
        Ok(())
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies binary overrides looked up through `lookup`. Empty values are
    /// ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pack) = lookup(PACK_BINARY_ENV).filter(|v| !v.is_empty()) {
            self.pack_binary = pack;
        }
        if let Some(docker) = lookup(DOCKER_BINARY_ENV).filter(|v| !v.is_empty()) {
            self.docker_binary = docker;
        }
        self
    }
}
