use std::collections::BTreeMap;

use hgr_core::errors::HgrError;
use hgr_core::weights;
use hgr_core::NodeId;
use tracing::debug;

use crate::hypergraph::HyperGraph;

impl HyperGraph {
    /// Returns a copy of the graph where parallel hyperedges are merged.
    ///
    /// Edges with the same member set collapse into one edge whose weight is
    /// the element-wise sum of the originals. Nodes and their weights are
    /// unchanged; merged edges keep the position of their first occurrence.
    pub fn compressed(&self) -> Result<HyperGraph, HgrError> {
        let mut slots: BTreeMap<&[NodeId], usize> = BTreeMap::new();
        let mut merged: Vec<(&[NodeId], Vec<f64>)> = Vec::new();
        for edge in self.edge_records() {
            match slots.get(edge.members.as_slice()) {
                Some(&slot) => weights::accumulate(&mut merged[slot].1, &edge.weights)?,
                None => {
                    slots.insert(edge.members.as_slice(), merged.len());
                    merged.push((edge.members.as_slice(), edge.weights.clone()));
                }
            }
        }

        let mut compressed = HyperGraph::new(self.config().clone())?;
        for node in self.node_records() {
            compressed.add_node(&node.weights)?;
        }
        for (members, weights) in merged {
            compressed.add_edge(members, &weights)?;
        }
        debug!(
            edges = self.edge_count(),
            compressed_edges = compressed.edge_count(),
            "merged parallel hyperedges"
        );
        Ok(compressed)
    }
}
