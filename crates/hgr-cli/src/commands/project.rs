use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use hgr_graph::{read_partition, save_partition, ClusterOptions, HierHyperGraph};

use super::{read_clusters, GraphInput};

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Parent graph the clusters were built from.
    #[command(flatten)]
    pub graph: GraphInput,
    /// Cluster file used to build the child graph.
    #[arg(long)]
    pub clusters: PathBuf,
    /// Keep boundary hyperedges through zero-weight virtual nodes.
    #[arg(long)]
    pub virtual_boundary: bool,
    /// Partition of the child graph.
    #[arg(long)]
    pub partition: PathBuf,
    /// Output path of the parent partition.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &ProjectArgs) -> Result<(), Box<dyn Error>> {
    let root = Arc::new(HierHyperGraph::from_graph(args.graph.load()?));
    let clusters = read_clusters(&args.clusters)?;
    let options = ClusterOptions {
        include_virtual_boundary_nodes: args.virtual_boundary,
    };
    let child = HierHyperGraph::cluster(&root, &clusters, options)?;
    let child_part = read_partition(&args.partition)?;
    let parent_part = child.part_result_of_parent(&child_part)?;
    save_partition(&parent_part, &args.out)?;
    Ok(())
}
