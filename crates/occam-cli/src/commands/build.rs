//! `occam build` — Run `pack build` and inspect the produced image.

use std::path::PathBuf;

use clap::Args;
use occam_common::config::OccamConfig;
use occam_pack::Pack;

use crate::output;

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Name of the image to produce.
    pub name: String,

    /// Application source directory.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Buildpack to use; repeat to use several, in order.
    #[arg(long = "buildpack")]
    pub buildpacks: Vec<String>,

    /// Network for build containers.
    #[arg(long)]
    pub network: Option<String>,

    /// Builder image.
    #[arg(long)]
    pub builder: Option<String>,

    /// Discard cached layers.
    #[arg(long)]
    pub clear_cache: bool,

    /// Build-time environment variable as KEY=VALUE; repeatable.
    #[arg(long, value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Use only locally available images.
    #[arg(long)]
    pub no_pull: bool,

    /// Pass --verbose to pack.
    #[arg(long)]
    pub verbose: bool,

    /// Pass --no-color to pack.
    #[arg(long)]
    pub no_color: bool,

    /// Print the build log after a successful build.
    #[arg(long)]
    pub show_logs: bool,

    /// Print the pack command line without running it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Executes the `build` command.
///
/// The build log is written to stderr when the build fails.
///
/// # Errors
///
/// Returns an error if `pack build` or the image inspection fails.
pub fn execute(args: BuildArgs, config: &OccamConfig) -> anyhow::Result<()> {
    let mut pack = Pack::from_config(config);
    if args.verbose {
        pack = pack.with_verbose();
    }
    if args.no_color {
        pack = pack.with_no_color();
    }

    let mut build = pack
        .build
        .with_buildpacks(args.buildpacks)
        .with_env(args.env);
    if let Some(network) = args.network {
        build = build.with_network(network);
    }
    if let Some(builder) = args.builder {
        build = build.with_builder(builder);
    }
    if args.clear_cache {
        build = build.with_clear_cache();
    }
    if args.no_pull {
        build = build.with_no_pull();
    }

    if args.dry_run {
        let command = build.args(&args.name, &args.path);
        println!("{}", output::command_line(&config.pack_binary, &command));
        return Ok(());
    }

    tracing::info!(name = %args.name, "building image");
    match build.execute(&args.name, &args.path) {
        Ok((image, logs)) => {
            if args.show_logs {
                print!("{logs}");
            }
            println!("{}", output::image_summary(&args.name, &image));
            Ok(())
        }
        Err(err) => {
            eprint!("{}", err.logs());
            Err(err.into())
        }
    }
}

/// Parses a `KEY=VALUE` pair. The value may itself contain `=`.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}
