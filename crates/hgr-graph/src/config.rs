use hgr_core::errors::{ErrorInfo, HgrError};
use serde::{Deserialize, Serialize};

/// Construction parameters of a [`HyperGraph`](crate::HyperGraph).
///
/// The factor vectors fix both the weight dimensions and the scalarization
/// used to turn a weight vector into a single cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Per-dimension scalarization factors of node weights.
    #[serde(default = "unit_factor")]
    pub node_weight_factor: Vec<f64>,
    /// Per-dimension scalarization factors of edge weights.
    #[serde(default = "unit_factor")]
    pub edge_weight_factor: Vec<f64>,
}

fn unit_factor() -> Vec<f64> {
    vec![1.0]
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_weight_factor: unit_factor(),
            edge_weight_factor: unit_factor(),
        }
    }
}

impl GraphConfig {
    /// Creates a configuration from explicit factor vectors.
    pub fn new(node_weight_factor: Vec<f64>, edge_weight_factor: Vec<f64>) -> Self {
        Self {
            node_weight_factor,
            edge_weight_factor,
        }
    }

    /// Creates a configuration whose factors are all `1.0`.
    pub fn uniform(node_weight_dim: usize, edge_weight_dim: usize) -> Self {
        Self::new(vec![1.0; node_weight_dim], vec![1.0; edge_weight_dim])
    }

    /// Dimension of node weight vectors.
    pub fn node_weight_dim(&self) -> usize {
        self.node_weight_factor.len()
    }

    /// Dimension of edge weight vectors.
    pub fn edge_weight_dim(&self) -> usize {
        self.edge_weight_factor.len()
    }

    /// Rejects empty factor vectors.
    pub fn validate(&self) -> Result<(), HgrError> {
        if self.node_weight_factor.is_empty() {
            return Err(empty_factor("node"));
        }
        if self.edge_weight_factor.is_empty() {
            return Err(empty_factor("edge"));
        }
        Ok(())
    }
}

pub(crate) fn empty_factor(kind: &str) -> HgrError {
    HgrError::Dimension(
        ErrorInfo::new("empty-weight-factor", "weight factor vectors must not be empty")
            .with_context("kind", kind),
    )
}

/// Options of [`HierHyperGraph::cluster`](crate::HierHyperGraph::cluster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterOptions {
    /// Keep hyperedges that cross the clustered region by adding one virtual
    /// child node per external parent node.
    ///
    /// When disabled, a hyperedge with exactly one internal cluster and any
    /// number of external members collapses to a single child node and is
    /// dropped.
    #[serde(default)]
    pub include_virtual_boundary_nodes: bool,
}

impl ClusterOptions {
    /// Options with virtual boundary nodes enabled.
    pub fn with_virtual_boundary() -> Self {
        Self {
            include_virtual_boundary_nodes: true,
        }
    }
}
