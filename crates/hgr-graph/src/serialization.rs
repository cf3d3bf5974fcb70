use hgr_core::errors::{ErrorInfo, HgrError};
use hgr_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::config::GraphConfig;
use crate::hypergraph::HyperGraph;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &HyperGraph) -> Result<Vec<u8>, HgrError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| HgrError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<HyperGraph, HgrError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| HgrError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &HyperGraph) -> Result<String, HgrError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| HgrError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
///
/// The snapshot is replayed through the regular construction path, so a
/// hand-edited snapshot is validated like any other input.
pub fn graph_from_json(json: &str) -> Result<HyperGraph, HgrError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| HgrError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    config: GraphConfig,
    nodes: Vec<Vec<f64>>,
    edges: Vec<SerializableEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableEdge {
    members: Vec<u64>,
    weights: Vec<f64>,
}

impl SerializableGraph {
    fn from_graph(graph: &HyperGraph) -> Self {
        let nodes = graph
            .node_records()
            .iter()
            .map(|node| node.weights.clone())
            .collect();
        let edges = graph
            .edge_records()
            .iter()
            .map(|edge| SerializableEdge {
                members: edge.members.iter().map(|id| id.as_raw()).collect(),
                weights: edge.weights.clone(),
            })
            .collect();
        Self {
            config: graph.config().clone(),
            nodes,
            edges,
        }
    }

    fn into_graph(self) -> Result<HyperGraph, HgrError> {
        let mut graph = HyperGraph::new(self.config)?;
        for weights in &self.nodes {
            graph.add_node(weights)?;
        }
        for edge in self.edges {
            let members: Vec<NodeId> = edge.members.into_iter().map(NodeId::from_raw).collect();
            graph.add_edge(&members, &edge.weights)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::node_ids;

    #[test]
    fn json_snapshot_restores_equal_graph() {
        let mut graph = HyperGraph::new(GraphConfig::new(vec![1.0, 0.5], vec![2.0])).unwrap();
        graph.add_node(&[1.0, 2.0]).unwrap();
        graph.add_node(&[0.25, 0.0]).unwrap();
        graph.add_node(&[3.0, 1.0]).unwrap();
        graph.add_edge(&node_ids([2, 0, 1]), &[1.5]).unwrap();
        let json = graph_to_json(&graph).unwrap();
        assert_eq!(graph_from_json(&json).unwrap(), graph);
    }

    #[test]
    fn corrupt_snapshot_is_a_serde_error() {
        let err = graph_from_bytes(&[0xff, 0x01]).unwrap_err();
        assert_eq!(err.code(), "deserialize-bytes");
        let err = graph_from_json("{\"config\": 3}").unwrap_err();
        assert!(matches!(err, HgrError::Serde(_)));
    }

    #[test]
    fn snapshot_edges_are_revalidated() {
        let json = r#"{"config":{"node_weight_factor":[1.0],"edge_weight_factor":[1.0]},
            "nodes":[[1.0],[1.0]],"edges":[{"members":[0,5],"weights":[1.0]}]}"#;
        let err = graph_from_json(json).unwrap_err();
        assert!(matches!(err, HgrError::InvalidEdge(_)));
    }
}
