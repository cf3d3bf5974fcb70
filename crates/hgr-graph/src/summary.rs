//! Human and machine readable graph reports.

use std::fmt;

use hgr_core::errors::HgrError;
use hgr_core::stats::Distribution;
use serde::{Deserialize, Serialize};

use crate::hypergraph::HyperGraph;

const HISTOGRAM_BUCKETS: usize = 10;

/// Aggregate statistics of a [`HyperGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of hyperedges.
    pub edge_count: usize,
    /// Node weight factors.
    pub node_weight_factor: Vec<f64>,
    /// Edge weight factors.
    pub edge_weight_factor: Vec<f64>,
    /// Element-wise sum of node weights.
    pub total_node_weight: Vec<f64>,
    /// Element-wise sum of edge weights.
    pub total_edge_weight: Vec<f64>,
    /// Scalarized total edge weight.
    pub scalar_edge_weight: f64,
    /// One distribution per node weight dimension.
    pub node_weights: Vec<Distribution>,
    /// Distribution of scalarized edge weights.
    pub edge_weights: Distribution,
    /// Distribution of edge degrees.
    pub edge_degrees: Distribution,
}

impl HyperGraph {
    /// Summarizes the graph; `verbose` attaches histograms to every distribution.
    pub fn summary(&self, verbose: bool) -> Result<GraphSummary, HgrError> {
        let distribution = |values: &[f64]| {
            if verbose {
                Distribution::with_histogram(values, HISTOGRAM_BUCKETS)
            } else {
                Distribution::of(values)
            }
        };

        let node_weights = (0..self.node_weight_dim())
            .map(|dim| {
                let column: Vec<f64> = self
                    .node_records()
                    .iter()
                    .map(|node| node.weights[dim])
                    .collect();
                distribution(&column)
            })
            .collect();
        let scalar_edges = self
            .edges()
            .map(|edge| self.scalar_edge_weight(edge))
            .collect::<Result<Vec<_>, _>>()?;
        let degrees: Vec<f64> = self
            .edge_records()
            .iter()
            .map(|edge| edge.members.len() as f64)
            .collect();

        let total_edge_weight = self.total_edge_weight()?;
        Ok(GraphSummary {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            node_weight_factor: self.node_weight_factor().to_vec(),
            edge_weight_factor: self.edge_weight_factor().to_vec(),
            total_node_weight: self.total_node_weight()?,
            scalar_edge_weight: self.edge_weight_sum(&total_edge_weight)?,
            total_edge_weight,
            node_weights,
            edge_weights: distribution(&scalar_edges),
            edge_degrees: distribution(&degrees),
        })
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes: {}", self.node_count)?;
        writeln!(f, "edges: {}", self.edge_count)?;
        writeln!(f, "node weight factor: {:?}", self.node_weight_factor)?;
        writeln!(f, "edge weight factor: {:?}", self.edge_weight_factor)?;
        writeln!(f, "total node weight: {:?}", self.total_node_weight)?;
        writeln!(
            f,
            "total edge weight: {:?} (scalar {})",
            self.total_edge_weight, self.scalar_edge_weight
        )?;
        for (dim, dist) in self.node_weights.iter().enumerate() {
            write_distribution(f, &format!("node weight[{dim}]"), dist)?;
        }
        write_distribution(f, "edge weight", &self.edge_weights)?;
        write_distribution(f, "edge degree", &self.edge_degrees)
    }
}

fn write_distribution(f: &mut fmt::Formatter<'_>, label: &str, dist: &Distribution) -> fmt::Result {
    writeln!(
        f,
        "{label}: min={} max={} mean={:.3} std={:.3}",
        dist.min, dist.max, dist.mean, dist.std_dev
    )?;
    if let Some(histogram) = &dist.histogram {
        for bucket in histogram {
            writeln!(
                f,
                "  [{:.3}, {:.3}): {}",
                bucket.lower, bucket.upper, bucket.count
            )?;
        }
    }
    Ok(())
}
