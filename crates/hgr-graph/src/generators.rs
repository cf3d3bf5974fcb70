use hgr_core::errors::{ErrorInfo, HgrError};
use hgr_core::rng::RngHandle;
use hgr_core::NodeId;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GraphConfig;
use crate::hypergraph::HyperGraph;

/// Generates a random hypergraph with deterministic randomness.
///
/// Every node and edge weight component is an integer drawn from
/// `1..=max_weight`; every edge spans between two and `max_degree` distinct
/// nodes.
pub fn gen_random_hypergraph(
    config: GraphConfig,
    node_count: usize,
    edge_count: usize,
    max_degree: usize,
    rng: &mut RngHandle,
) -> Result<HyperGraph, HgrError> {
    if node_count < 2 && edge_count > 0 {
        return Err(HgrError::Graph(
            ErrorInfo::new("too-few-nodes", "random edges require at least two nodes")
                .with_context("nodes", node_count),
        ));
    }
    const MAX_WEIGHT: u32 = 4;
    let mut graph = HyperGraph::new(config)?;
    let node_dim = graph.node_weight_dim();
    let edge_dim = graph.edge_weight_dim();

    let nodes: Vec<NodeId> = (0..node_count)
        .map(|_| graph.add_node(&random_weights(node_dim, MAX_WEIGHT, rng)))
        .collect::<Result<_, _>>()?;

    let max_degree = max_degree.clamp(2, node_count.max(2));
    for _ in 0..edge_count {
        let degree = rng.gen_range(2..=max_degree);
        let members = sample_subset(&nodes, degree, rng);
        graph.add_edge(&members, &random_weights(edge_dim, MAX_WEIGHT, rng))?;
    }
    Ok(graph)
}

/// Splits `0..node_count` into `cluster_count` random, disjoint, non-empty clusters.
pub fn gen_random_clustering(
    node_count: usize,
    cluster_count: usize,
    rng: &mut RngHandle,
) -> Result<Vec<Vec<NodeId>>, HgrError> {
    if cluster_count == 0 || cluster_count > node_count {
        return Err(HgrError::Clustering(
            ErrorInfo::new(
                "cluster-count",
                "cluster count must be between one and the node count",
            )
            .with_context("clusters", cluster_count)
            .with_context("nodes", node_count),
        ));
    }
    let mut order: Vec<NodeId> = (0..node_count).map(NodeId::from_index).collect();
    order.shuffle(rng);
    let mut clusters: Vec<Vec<NodeId>> = vec![Vec::new(); cluster_count];
    for (idx, node) in order.into_iter().enumerate() {
        let slot = if idx < cluster_count {
            idx
        } else {
            rng.gen_range(0..cluster_count)
        };
        clusters[slot].push(node);
    }
    for cluster in &mut clusters {
        cluster.sort();
    }
    Ok(clusters)
}

fn random_weights(dim: usize, max: u32, rng: &mut RngHandle) -> Vec<f64> {
    (0..dim).map(|_| f64::from(rng.gen_range(1..=max))).collect()
}

fn sample_subset(nodes: &[NodeId], count: usize, rng: &mut RngHandle) -> Vec<NodeId> {
    let mut buffer: Vec<NodeId> = nodes.choose_multiple(rng, count).copied().collect();
    buffer.sort();
    buffer
}
