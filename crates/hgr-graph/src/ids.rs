use std::collections::BTreeSet;

use hgr_core::{EdgeId, NodeId};

/// Creates a [`NodeId`] from an index.
pub(crate) fn make_node(index: usize) -> NodeId {
    NodeId::from_index(index)
}

/// Creates an [`EdgeId`] from an index.
pub(crate) fn make_edge(index: usize) -> EdgeId {
    EdgeId::from_index(index)
}

/// Ensures that the list of node identifiers is sorted and contains no duplicates.
pub(crate) fn canonicalize_nodes(nodes: &[NodeId]) -> Vec<NodeId> {
    let set: BTreeSet<NodeId> = nodes.iter().copied().collect();
    set.into_iter().collect()
}
