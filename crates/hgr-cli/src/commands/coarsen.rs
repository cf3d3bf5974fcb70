use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use hgr_graph::{ClusterOptions, HierHyperGraph};
use serde::Serialize;
use tracing::info;

use super::{read_clusters, write_json, GraphInput};

#[derive(Args, Debug)]
pub struct CoarsenArgs {
    #[command(flatten)]
    pub graph: GraphInput,
    /// Cluster file, one cluster of 0-based parent ids per line.
    #[arg(long)]
    pub clusters: PathBuf,
    /// Keep boundary hyperedges through zero-weight virtual nodes.
    #[arg(long)]
    pub virtual_boundary: bool,
    /// Output path of the child graph.
    #[arg(long)]
    pub out: PathBuf,
    /// Output path of the child-to-parent map (JSON).
    #[arg(long)]
    pub map: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ChildMap {
    parents: Vec<Vec<u64>>,
    virtual_nodes: Vec<u64>,
}

pub fn run(args: &CoarsenArgs) -> Result<(), Box<dyn Error>> {
    let root = Arc::new(HierHyperGraph::from_graph(args.graph.load()?));
    let clusters = read_clusters(&args.clusters)?;
    let options = ClusterOptions {
        include_virtual_boundary_nodes: args.virtual_boundary,
    };
    let child = HierHyperGraph::cluster(&root, &clusters, options)?;
    child.save_hmetis(&args.out)?;

    if let Some(path) = &args.map {
        let mut map = ChildMap {
            parents: Vec::with_capacity(child.node_count()),
            virtual_nodes: Vec::new(),
        };
        for node in child.nodes() {
            let parents = child.parents_of_node(node)?;
            map.parents.push(parents.iter().map(|id| id.as_raw()).collect());
            if child.is_virtual_node(node)? {
                map.virtual_nodes.push(node.as_raw());
            }
        }
        write_json(path, &map)?;
    }

    info!(
        parent_nodes = root.node_count(),
        nodes = child.node_count(),
        virtual_nodes = child.virtual_node_count(),
        edges = child.edge_count(),
        "wrote child graph"
    );
    Ok(())
}
