use sha2::{Digest, Sha256};

use crate::hypergraph::HyperGraph;

/// Computes the canonical structural hash of a graph.
///
/// Covers the weight factors, every node weight vector in id order and the
/// multiset of edges (members plus weights). Edge creation order does not
/// affect the hash; node order does, since node ids are meaningful.
pub fn canonical_hash(graph: &HyperGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"node-factor");
    update_floats(graph.node_weight_factor(), &mut hasher);
    hasher.update(b"edge-factor");
    update_floats(graph.edge_weight_factor(), &mut hasher);

    hasher.update((graph.node_count() as u64).to_le_bytes());
    for node in graph.node_records() {
        update_floats(&node.weights, &mut hasher);
    }

    let mut signatures: Vec<(Vec<u64>, Vec<u64>)> = graph
        .edge_records()
        .iter()
        .map(|edge| {
            (
                edge.members.iter().map(|id| id.as_raw()).collect(),
                edge.weights.iter().map(|w| w.to_bits()).collect(),
            )
        })
        .collect();
    signatures.sort();
    hasher.update((signatures.len() as u64).to_le_bytes());
    for (members, weights) in signatures {
        update_slice(&members, &mut hasher);
        update_slice(&weights, &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn update_floats(values: &[f64], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_bits().to_le_bytes());
    }
}

fn update_slice(values: &[u64], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::node_ids;

    fn graph(edges: &[([u64; 2], f64)]) -> HyperGraph {
        let mut graph = HyperGraph::with_dims(1, 1).unwrap();
        for _ in 0..3 {
            graph.add_node(&[1.0]).unwrap();
        }
        for (members, weight) in edges {
            graph.add_edge(&node_ids(*members), &[*weight]).unwrap();
        }
        graph
    }

    #[test]
    fn edge_order_is_irrelevant() {
        let a = graph(&[([0, 1], 1.0), ([1, 2], 2.0)]);
        let b = graph(&[([2, 1], 2.0), ([1, 0], 1.0)]);
        assert_eq!(canonical_hash(&a), canonical_hash(&b));
    }

    #[test]
    fn weights_change_the_hash() {
        let a = graph(&[([0, 1], 1.0)]);
        let b = graph(&[([0, 1], 1.5)]);
        assert_ne!(canonical_hash(&a), canonical_hash(&b));
    }
}
