//! `occam rmi` — Force-remove a local image.

use clap::Args;
use occam_common::config::OccamConfig;
use occam_docker::DockerImageClient;

/// Arguments for the `rmi` command.
#[derive(Args, Debug)]
pub struct RmiArgs {
    /// Image reference.
    pub reference: String,
}

/// Executes the `rmi` command.
///
/// # Errors
///
/// Returns an error if the image cannot be removed.
pub fn execute(args: &RmiArgs, config: &OccamConfig) -> anyhow::Result<()> {
    DockerImageClient::from_config(config).remove(&args.reference)?;
    println!("Removed {}", args.reference);
    Ok(())
}
