use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::GraphInput;

#[derive(Args, Debug)]
pub struct CompressArgs {
    #[command(flatten)]
    pub graph: GraphInput,
    /// Output path of the compressed graph.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &CompressArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.graph.load()?;
    let compressed = graph.compressed()?;
    compressed.save_hmetis(&args.out)?;
    info!(
        edges = graph.edge_count(),
        compressed_edges = compressed.edge_count(),
        "compressed graph"
    );
    Ok(())
}
