//! CLI command definitions and dispatch.

pub mod build;
pub mod inspect;
pub mod rmi;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use occam_common::config::OccamConfig;

/// occam — build images with `pack` and inspect them.
#[derive(Parser, Debug)]
#[command(name = "occam", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON file naming the `pack` and `docker` binaries to use.
    #[arg(long, global = true, env = "OCCAM_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run `pack build` and inspect the produced image.
    Build(build::BuildArgs),
    /// Print metadata for a local image.
    Inspect(inspect::InspectArgs),
    /// Force-remove a local image.
    Rmi(rmi::RmiArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command
/// fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Build(args) => build::execute(args, &config),
        Command::Inspect(args) => inspect::execute(&args, &config),
        Command::Rmi(args) => rmi::execute(&args, &config),
    }
}

/// Loads the configuration file if one was given, then applies environment
/// overrides.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<OccamConfig> {
    OccamConfig::load_or_env(path).with_context(|| match path {
        Some(path) => format!("loading config from {}", path.display()),
        None => "loading config".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "occam",
            "build",
            "my-app",
            "--path",
            "./app",
            "--buildpack",
            "a",
            "--buildpack",
            "b",
            "--env",
            "A=1",
            "--no-pull",
        ])
        .unwrap();
        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.name, "my-app");
                assert_eq!(args.buildpacks, ["a", "b"]);
                assert_eq!(args.env, [("A".to_string(), "1".to_string())]);
                assert!(args.no_pull);
                assert!(!args.clear_cache);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn load_config_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("occam.json");
        std::fs::write(&path, r#"{ "pack_binary": "" }"#).unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("loading config from"));
        assert!(format!("{err:#}").contains("pack_binary must not be empty"));
    }

    #[test]
    fn load_config_without_file_uses_defaults() {
        let config = load_config(None).unwrap();
        assert!(!config.pack_binary.is_empty());
        assert!(!config.docker_binary.is_empty());
    }

    #[test]
    fn rejects_env_without_equals() {
        let result = Cli::try_parse_from(["occam", "build", "my-app", "--env", "NOVALUE"]);
        assert!(result.is_err());
    }
}
