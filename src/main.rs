use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod diagnostics;
mod model;
mod pipeline;
mod query;
mod render;
mod report;
mod results;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "nexmark-latency-plots")]
#[command(about = "Latency charts for Nexmark benchmark logs", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-window latency of a single log, one chart per query family.
    Windows {
        #[arg(default_value = config::DEFAULT_WINDOWS_INPUT)]
        input: PathBuf,

        /// Base image name; `-NQ5` / `-NQ8` is inserted before the extension.
        #[arg(default_value = config::DEFAULT_WINDOWS_IMAGE)]
        image: PathBuf,
    },

    /// Average latency by node count, dataflow count and throughput, plus missing.txt.
    Nodes {
        /// Directory holding results-1.csv, results-2.csv, ...
        #[arg(default_value = config::DEFAULT_RESULTS_DIR)]
        results_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Windows { input, image } => {
            pipeline::run_windows(&pipeline::WindowsRun { input, image })?;
        }
        Commands::Nodes { results_dir } => {
            let run = pipeline::NodesRun::new(
                results_dir,
                PathBuf::from(config::GRAPHS_DIR),
                PathBuf::from(config::MISSING_REPORT),
            );
            pipeline::run_nodes(&run)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_defaults() {
        let cli = Cli::try_parse_from(["nexmark-latency-plots", "windows"]).unwrap();
        match cli.cmd {
            Commands::Windows { input, image } => {
                assert_eq!(input, PathBuf::from("10000.csv"));
                assert_eq!(image, PathBuf::from("latency.png"));
            }
            _ => panic!("expected windows"),
        }

        let cli = Cli::try_parse_from(["nexmark-latency-plots", "nodes", "runs/a"]).unwrap();
        match cli.cmd {
            Commands::Nodes { results_dir } => assert_eq!(results_dir, PathBuf::from("runs/a")),
            _ => panic!("expected nodes"),
        }
    }
}
