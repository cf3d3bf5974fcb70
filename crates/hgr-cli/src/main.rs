use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    coarsen::{self, CoarsenArgs},
    compress::{self, CompressArgs},
    evaluate::{self, EvaluateArgs},
    info::{self, InfoArgs},
    project::{self, ProjectArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hgr", about = "Hierarchical hypergraph toolkit for hMETIS files")]
struct Cli {
    /// Emit debug-level log events.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print counts, weight totals and distributions of a graph.
    Info(InfoArgs),
    /// Merge hyperedges with identical member sets.
    Compress(CompressArgs),
    /// Report cut and balance metrics of a partition file.
    Evaluate(EvaluateArgs),
    /// Build a clustered child graph from a cluster file.
    Coarsen(CoarsenArgs),
    /// Expand a child partition to the parent level.
    Project(ProjectArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Info(args) => info::run(&args),
        Command::Compress(args) => compress::run(&args),
        Command::Evaluate(args) => evaluate::run(&args),
        Command::Coarsen(args) => coarsen::run(&args),
        Command::Project(args) => project::run(&args),
    }
}
