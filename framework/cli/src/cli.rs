use clap::{Args, Parser, Subcommand};
use crosswind_runner::prelude::StartOptions;
use std::path::PathBuf;

/// Where `start` looks for the benchmark definition when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "inputs/benchmarks.json";

#[derive(Debug, Parser)]
#[command(about = "Compare request latency across HTTP services", long_about = None)]
pub struct CrosswindCli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the benchmark described by a definition file and store the results
    Start(StartArgs),
    /// Render a stored results file as an interactive HTML chart
    Visualize {
        /// Path to a results file written by `start`
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Path to the benchmark definition
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Only measure the system with this name
    #[clap(long)]
    pub system: Option<String>,

    /// Base directory for results. Defaults to `$CROSSWIND_OUTPUT_DIR`, or `outputs` if that is not set.
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,
}

impl From<StartArgs> for StartOptions {
    fn from(args: StartArgs) -> Self {
        StartOptions {
            definition_path: args.config,
            target_system: args.system,
            output_dir: args.output_dir,
            no_progress: args.no_progress,
        }
    }
}
