//! Image metadata decoded from `docker image inspect`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use occam_common::constants::LIFECYCLE_METADATA_LABEL;
use serde::{Deserialize, Serialize};

use crate::error::DockerError;

/// Metadata about a locally stored image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Content-addressable image ID (`sha256:...`).
    pub id: String,
    /// Creation timestamp, when the runtime reports one.
    pub created: Option<DateTime<Utc>>,
    /// Image labels.
    pub labels: BTreeMap<String, String>,
    /// Default environment of containers started from the image, as
    /// `KEY=VALUE` strings.
    pub env: Vec<String>,
    /// Buildpacks that contributed to the image, in build order.
    pub buildpacks: Vec<ImageBuildpackMetadata>,
}

/// A buildpack recorded in the lifecycle metadata label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBuildpackMetadata {
    /// Buildpack ID, e.g. `paketo-buildpacks/go-dist`.
    pub key: String,
    /// Buildpack version, if recorded.
    #[serde(default)]
    pub version: Option<String>,
    /// Layers the buildpack contributed, by layer name.
    #[serde(default)]
    pub layers: BTreeMap<String, ImageBuildpackMetadataLayer>,
}

/// A single layer contributed by a buildpack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBuildpackMetadataLayer {
    /// Layer digest.
    #[serde(default)]
    pub sha: String,
    /// Available at build time to later buildpacks.
    #[serde(default)]
    pub build: bool,
    /// Included in the final image.
    #[serde(default)]
    pub launch: bool,
    /// Restored from cache on the next build.
    #[serde(default)]
    pub cache: bool,
    /// Free-form metadata the buildpack stored for the layer.
    #[serde(default, rename = "data")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct InspectEntry {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Created", default)]
    created: Option<String>,
    #[serde(rename = "Config", default)]
    config: InspectConfig,
}

#[derive(Default, Deserialize)]
struct InspectConfig {
    #[serde(rename = "Labels", default)]
    labels: Option<BTreeMap<String, String>>,
    #[serde(rename = "Env", default)]
    env: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct LifecycleMetadata {
    #[serde(default)]
    buildpacks: Vec<ImageBuildpackMetadata>,
}

impl Image {
    /// Decodes the JSON array printed by `docker image inspect <reference>`.
    ///
    /// Only the first entry is used. A missing or unparseable `Created`
    /// timestamp leaves [`Image::created`] empty rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`DockerError::NotFound`] for an empty array and
    /// [`DockerError::Parse`] if the output or the lifecycle metadata label
    /// is not valid JSON.
    pub fn from_inspect_output(reference: &str, output: &str) -> Result<Self, DockerError> {
        let parse_error = |source| DockerError::Parse {
            reference: reference.to_string(),
            source,
        };

        let entries: Vec<InspectEntry> = serde_json::from_str(output).map_err(parse_error)?;
        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| DockerError::NotFound {
                reference: reference.to_string(),
            })?;

        let labels = entry.config.labels.unwrap_or_default();
        let buildpacks = match labels.get(LIFECYCLE_METADATA_LABEL) {
            Some(raw) => {
                serde_json::from_str::<LifecycleMetadata>(raw)
                    .map_err(parse_error)?
                    .buildpacks
            }
            None => Vec::new(),
        };

        let created = entry
            .created
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        Ok(Self {
            id: entry.id,
            created,
            labels,
            env: entry.config.env.unwrap_or_default(),
            buildpacks,
        })
    }

    /// Returns the value of `key` in the image's default environment.
    #[must_use]
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env.iter().find_map(|entry| {
            entry
                .split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSPECT_OUTPUT: &str = r#"[
      {
        "Id": "sha256:6fa3b8c1e1e5f0d6c1a3",
        "Created": "1980-01-01T00:00:01Z",
        "Config": {
          "Env": ["PATH=/cnb/process:/usr/bin", "CNB_APP_DIR=/workspace"],
          "Labels": {
            "io.buildpacks.stack.id": "io.buildpacks.stacks.jammy",
            "io.buildpacks.lifecycle.metadata": "{\"buildpacks\":[{\"key\":\"paketo-buildpacks/go-dist\",\"version\":\"2.3.4\",\"layers\":{\"go\":{\"sha\":\"sha256:go-layer\",\"data\":{\"dependency-sha\":\"abc\"},\"build\":true,\"launch\":false,\"cache\":true}}},{\"key\":\"paketo-buildpacks/go-build\",\"layers\":{}}]}"
          }
        }
      }
    ]"#;

    #[test]
    fn parses_id_created_env_and_labels() {
        let image = Image::from_inspect_output("app", INSPECT_OUTPUT).expect("parse");
        assert_eq!(image.id, "sha256:6fa3b8c1e1e5f0d6c1a3");
        assert_eq!(
            image.created.map(|c| c.to_rfc3339()),
            Some("1980-01-01T00:00:01+00:00".to_string())
        );
        assert_eq!(image.env.len(), 2);
        assert_eq!(
            image.labels.get("io.buildpacks.stack.id").map(String::as_str),
            Some("io.buildpacks.stacks.jammy")
        );
    }

    #[test]
    fn parses_buildpacks_in_order_with_layers() {
        let image = Image::from_inspect_output("app", INSPECT_OUTPUT).expect("parse");
        let keys: Vec<&str> = image.buildpacks.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["paketo-buildpacks/go-dist", "paketo-buildpacks/go-build"]);

        let dist = &image.buildpacks[0];
        assert_eq!(dist.version.as_deref(), Some("2.3.4"));
        let go = &dist.layers["go"];
        assert_eq!(go.sha, "sha256:go-layer");
        assert!(go.build);
        assert!(!go.launch);
        assert!(go.cache);
        assert_eq!(go.metadata["dependency-sha"], serde_json::json!("abc"));

        assert!(image.buildpacks[1].layers.is_empty());
        assert!(image.buildpacks[1].version.is_none());
    }

    #[test]
    fn null_labels_and_env_yield_empty_collections() {
        let output = r#"[{"Id": "sha256:abc", "Config": {"Labels": null, "Env": null}}]"#;
        let image = Image::from_inspect_output("plain", output).expect("parse");
        assert!(image.labels.is_empty());
        assert!(image.env.is_empty());
        assert!(image.buildpacks.is_empty());
        assert!(image.created.is_none());
    }

    #[test]
    fn empty_array_is_not_found() {
        let err = Image::from_inspect_output("ghost", "[]").unwrap_err();
        assert!(matches!(err, DockerError::NotFound { ref reference } if reference == "ghost"));
    }

    #[test]
    fn malformed_output_is_parse_error() {
        let err = Image::from_inspect_output("app", "Error: no such image").unwrap_err();
        assert!(matches!(err, DockerError::Parse { .. }));
    }

    #[test]
    fn malformed_lifecycle_label_is_parse_error() {
        let output = r#"[{"Id": "sha256:abc", "Config": {"Labels": {"io.buildpacks.lifecycle.metadata": "{not json"}}}]"#;
        let err = Image::from_inspect_output("app", output).unwrap_err();
        assert!(matches!(err, DockerError::Parse { .. }));
    }

    #[test]
    fn env_value_looks_up_by_key() {
        let image = Image::from_inspect_output("app", INSPECT_OUTPUT).expect("parse");
        assert_eq!(image.env_value("CNB_APP_DIR"), Some("/workspace"));
        assert_eq!(image.env_value("PATH"), Some("/cnb/process:/usr/bin"));
        assert_eq!(image.env_value("HOME"), None);
    }
}
