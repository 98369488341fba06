//! `occam inspect` — Print metadata for a local image.

use clap::Args;
use occam_common::config::OccamConfig;
use occam_docker::{DockerImageClient, ImageClient};

use crate::output;

/// Arguments for the `inspect` command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image reference.
    pub reference: String,

    /// Print the full metadata as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `inspect` command.
///
/// # Errors
///
/// Returns an error if the image cannot be inspected.
pub fn execute(args: &InspectArgs, config: &OccamConfig) -> anyhow::Result<()> {
    let client = DockerImageClient::from_config(config);
    let image = client.inspect(&args.reference)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&image)?);
    } else {
        println!("{}", output::image_summary(&args.reference, &image));
    }
    Ok(())
}
