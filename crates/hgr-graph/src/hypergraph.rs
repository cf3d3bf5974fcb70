use hgr_core::errors::{dimension_mismatch, ErrorInfo, HgrError};
use hgr_core::weights;
use hgr_core::{EdgeId, NodeId};

use crate::config::{empty_factor, GraphConfig};
use crate::ids::{canonicalize_nodes, make_edge, make_node};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeRecord {
    pub(crate) weights: Vec<f64>,
    pub(crate) edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EdgeRecord {
    pub(crate) weights: Vec<f64>,
    pub(crate) members: Vec<NodeId>,
}

/// Append-only weighted hypergraph.
///
/// Nodes and hyperedges are identified by dense indices in insertion order.
/// Every node and edge carries a weight vector whose length matches the
/// dimension fixed by the graph's [`GraphConfig`]; node-to-edge and
/// edge-to-node incidence is kept in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperGraph {
    config: GraphConfig,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl HyperGraph {
    /// Creates an empty hypergraph; fails when a factor vector is empty.
    pub fn new(config: GraphConfig) -> Result<Self, HgrError> {
        config.validate()?;
        Ok(Self {
            config,
            nodes: Vec::new(),
            edges: Vec::new(),
        })
    }

    /// Creates an empty hypergraph with all-ones factors of the given dimensions.
    pub fn with_dims(node_weight_dim: usize, edge_weight_dim: usize) -> Result<Self, HgrError> {
        Self::new(GraphConfig::uniform(node_weight_dim, edge_weight_dim))
    }

    /// Returns the configuration used by this graph.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of hyperedges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Dimension of node weight vectors.
    pub fn node_weight_dim(&self) -> usize {
        self.config.node_weight_dim()
    }

    /// Dimension of edge weight vectors.
    pub fn edge_weight_dim(&self) -> usize {
        self.config.edge_weight_dim()
    }

    /// Scalarization factors of node weights.
    pub fn node_weight_factor(&self) -> &[f64] {
        &self.config.node_weight_factor
    }

    /// Scalarization factors of edge weights.
    pub fn edge_weight_factor(&self) -> &[f64] {
        &self.config.edge_weight_factor
    }

    /// Iterates all node identifiers.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> {
        (0..self.nodes.len()).map(make_node)
    }

    /// Iterates all edge identifiers.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeId> {
        (0..self.edges.len()).map(make_edge)
    }

    /// Appends a node and returns its identifier.
    pub fn add_node(&mut self, weights: &[f64]) -> Result<NodeId, HgrError> {
        self.ensure_node_dim(weights)?;
        let id = make_node(self.nodes.len());
        self.nodes.push(NodeRecord {
            weights: weights.to_vec(),
            edges: Vec::new(),
        });
        Ok(id)
    }

    /// Appends a hyperedge spanning `members` and returns its identifier.
    ///
    /// Members are treated as a set. Fewer than two distinct members, or a
    /// member that is not a node of this graph, is rejected.
    pub fn add_edge(&mut self, members: &[NodeId], weights: &[f64]) -> Result<EdgeId, HgrError> {
        self.ensure_edge_dim(weights)?;
        let members = canonicalize_nodes(members);
        if members.len() < 2 {
            return Err(HgrError::InvalidEdge(
                ErrorInfo::new(
                    "too-few-members",
                    "hyperedges require at least two distinct members",
                )
                .with_context("members", members.len()),
            ));
        }
        if let Some(missing) = members.iter().find(|node| node.index() >= self.nodes.len()) {
            return Err(HgrError::InvalidEdge(
                ErrorInfo::new("unknown-member", "hyperedge member is not a node of the graph")
                    .with_context("node", missing.as_raw())
                    .with_context("node_count", self.nodes.len()),
            ));
        }
        let id = make_edge(self.edges.len());
        for member in &members {
            self.nodes[member.index()].edges.push(id);
        }
        self.edges.push(EdgeRecord {
            weights: weights.to_vec(),
            members,
        });
        Ok(id)
    }

    /// Replaces the weight vector of an existing node.
    pub fn set_node_weights(&mut self, node: NodeId, weights: &[f64]) -> Result<(), HgrError> {
        self.ensure_node_dim(weights)?;
        let record = self.node_mut(node)?;
        record.weights = weights.to_vec();
        Ok(())
    }

    /// Replaces the weight vector of an existing edge.
    pub fn set_edge_weights(&mut self, edge: EdgeId, weights: &[f64]) -> Result<(), HgrError> {
        self.ensure_edge_dim(weights)?;
        let record = self.edge_mut(edge)?;
        record.weights = weights.to_vec();
        Ok(())
    }

    /// Replaces the node weight factors and reshapes every node weight vector
    /// to the new dimension, padding with `1.0` or truncating.
    pub fn set_node_weight_factor(&mut self, factor: Vec<f64>) -> Result<(), HgrError> {
        if factor.is_empty() {
            return Err(empty_factor("node"));
        }
        let dim = factor.len();
        self.config.node_weight_factor = factor;
        for node in &mut self.nodes {
            weights::reshape(&mut node.weights, dim);
        }
        Ok(())
    }

    /// Replaces the edge weight factors and reshapes every edge weight vector
    /// to the new dimension, padding with `1.0` or truncating.
    pub fn set_edge_weight_factor(&mut self, factor: Vec<f64>) -> Result<(), HgrError> {
        if factor.is_empty() {
            return Err(empty_factor("edge"));
        }
        let dim = factor.len();
        self.config.edge_weight_factor = factor;
        for edge in &mut self.edges {
            weights::reshape(&mut edge.weights, dim);
        }
        Ok(())
    }

    /// Weight vector of a node.
    pub fn node_weights(&self, node: NodeId) -> Result<&[f64], HgrError> {
        Ok(&self.node(node)?.weights)
    }

    /// Weight vector of an edge.
    pub fn edge_weights(&self, edge: EdgeId) -> Result<&[f64], HgrError> {
        Ok(&self.edge(edge)?.weights)
    }

    /// Members of an edge, sorted by identifier.
    pub fn members_of(&self, edge: EdgeId) -> Result<&[NodeId], HgrError> {
        Ok(&self.edge(edge)?.members)
    }

    /// Edges incident on a node, in creation order.
    pub fn edges_of(&self, node: NodeId) -> Result<&[EdgeId], HgrError> {
        Ok(&self.node(node)?.edges)
    }

    /// Number of members of an edge.
    pub fn edge_degree(&self, edge: EdgeId) -> Result<usize, HgrError> {
        Ok(self.edge(edge)?.members.len())
    }

    /// Largest edge degree, `0` for a graph without edges.
    pub fn max_edge_degree(&self) -> usize {
        self.edges
            .iter()
            .map(|edge| edge.members.len())
            .max()
            .unwrap_or(0)
    }

    /// Scalarizes a node weight vector with the node factors.
    pub fn node_weight_sum(&self, weights: &[f64]) -> Result<f64, HgrError> {
        weights::weighted_sum(weights, &self.config.node_weight_factor)
    }

    /// Scalarizes an edge weight vector with the edge factors.
    pub fn edge_weight_sum(&self, weights: &[f64]) -> Result<f64, HgrError> {
        weights::weighted_sum(weights, &self.config.edge_weight_factor)
    }

    /// Scalar cost of a node.
    pub fn scalar_node_weight(&self, node: NodeId) -> Result<f64, HgrError> {
        self.node_weight_sum(self.node_weights(node)?)
    }

    /// Scalar cost of an edge.
    pub fn scalar_edge_weight(&self, edge: EdgeId) -> Result<f64, HgrError> {
        self.edge_weight_sum(self.edge_weights(edge)?)
    }

    /// Element-wise maximum over all node weight vectors.
    pub fn max_node_weight(&self) -> Result<Vec<f64>, HgrError> {
        let mut max = vec![0.0_f64; self.node_weight_dim()];
        for node in &self.nodes {
            max = weights::max(&max, &node.weights)?;
        }
        Ok(max)
    }

    /// Sum of all node weight vectors.
    pub fn total_node_weight(&self) -> Result<Vec<f64>, HgrError> {
        sum_vectors(self.node_weight_dim(), self.nodes.iter().map(|n| &n.weights))
    }

    /// Sum of all edge weight vectors.
    pub fn total_edge_weight(&self) -> Result<Vec<f64>, HgrError> {
        sum_vectors(self.edge_weight_dim(), self.edges.iter().map(|e| &e.weights))
    }

    /// Sum of the weight vectors of an edge's members.
    pub fn member_weight_of_edge(&self, edge: EdgeId) -> Result<Vec<f64>, HgrError> {
        let record = self.edge(edge)?;
        sum_vectors(
            self.node_weight_dim(),
            record.members.iter().map(|m| &self.nodes[m.index()].weights),
        )
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&NodeRecord, HgrError> {
        self.nodes.get(id.index()).ok_or_else(|| unknown_node(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeRecord, HgrError> {
        self.nodes.get_mut(id.index()).ok_or_else(|| unknown_node(id))
    }

    pub(crate) fn edge(&self, id: EdgeId) -> Result<&EdgeRecord, HgrError> {
        self.edges.get(id.index()).ok_or_else(|| unknown_edge(id))
    }

    fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeRecord, HgrError> {
        self.edges.get_mut(id.index()).ok_or_else(|| unknown_edge(id))
    }

    pub(crate) fn node_records(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub(crate) fn edge_records(&self) -> &[EdgeRecord] {
        &self.edges
    }

    fn ensure_node_dim(&self, weights: &[f64]) -> Result<(), HgrError> {
        if weights.len() != self.node_weight_dim() {
            return Err(dimension_mismatch(
                "node weights",
                self.node_weight_dim(),
                weights.len(),
            ));
        }
        Ok(())
    }

    fn ensure_edge_dim(&self, weights: &[f64]) -> Result<(), HgrError> {
        if weights.len() != self.edge_weight_dim() {
            return Err(dimension_mismatch(
                "edge weights",
                self.edge_weight_dim(),
                weights.len(),
            ));
        }
        Ok(())
    }
}

impl Default for HyperGraph {
    fn default() -> Self {
        Self {
            config: GraphConfig::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

fn sum_vectors<'a>(
    dim: usize,
    vectors: impl Iterator<Item = &'a Vec<f64>>,
) -> Result<Vec<f64>, HgrError> {
    let mut total = vec![0.0; dim];
    for vector in vectors {
        weights::accumulate(&mut total, vector)?;
    }
    Ok(total)
}

pub(crate) fn unknown_node(id: NodeId) -> HgrError {
    HgrError::Graph(
        ErrorInfo::new("unknown-node", "node does not exist").with_context("node", id.as_raw()),
    )
}

pub(crate) fn unknown_edge(id: EdgeId) -> HgrError {
    HgrError::Graph(
        ErrorInfo::new("unknown-edge", "edge does not exist").with_context("edge", id.as_raw()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::node_ids;

    fn sample() -> HyperGraph {
        let mut graph = HyperGraph::with_dims(2, 1).unwrap();
        for weights in [[1.0, 2.0], [3.0, 0.5], [0.0, 4.0]] {
            graph.add_node(&weights).unwrap();
        }
        graph.add_edge(&node_ids([0, 1, 2]), &[1.0]).unwrap();
        graph.add_edge(&node_ids([2, 1]), &[2.0]).unwrap();
        graph
    }

    #[test]
    fn incidence_is_recorded_both_ways() {
        let graph = sample();
        let e1 = EdgeId::from_raw(1);
        assert_eq!(graph.members_of(e1).unwrap(), node_ids([1, 2]).as_slice());
        assert_eq!(
            graph.edges_of(NodeId::from_raw(2)).unwrap(),
            &[EdgeId::from_raw(0), e1]
        );
        assert_eq!(graph.edges_of(NodeId::from_raw(0)).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_members_collapse_before_arity_check() {
        let mut graph = sample();
        let err = graph.add_edge(&node_ids([1, 1]), &[1.0]).unwrap_err();
        assert!(matches!(err, HgrError::InvalidEdge(info) if info.code == "too-few-members"));
    }

    #[test]
    fn unknown_member_is_rejected_without_side_effects() {
        let mut graph = sample();
        let err = graph.add_edge(&node_ids([0, 9]), &[1.0]).unwrap_err();
        assert!(matches!(err, HgrError::InvalidEdge(info) if info.code == "unknown-member"));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_of(NodeId::from_raw(0)).unwrap().len(), 1);
    }

    #[test]
    fn factor_reshape_pads_and_truncates() {
        let mut graph = sample();
        graph.set_node_weight_factor(vec![1.0, 1.0, 2.0]).unwrap();
        assert_eq!(
            graph.node_weights(NodeId::from_raw(0)).unwrap(),
            &[1.0, 2.0, 1.0]
        );
        graph.set_node_weight_factor(vec![2.0]).unwrap();
        assert_eq!(graph.node_weights(NodeId::from_raw(1)).unwrap(), &[3.0]);
        assert_eq!(graph.scalar_node_weight(NodeId::from_raw(1)).unwrap(), 6.0);
        assert!(graph.set_edge_weight_factor(Vec::new()).is_err());
    }

    #[test]
    fn aggregates() {
        let graph = sample();
        assert_eq!(graph.total_node_weight().unwrap(), vec![4.0, 6.5]);
        assert_eq!(graph.total_edge_weight().unwrap(), vec![3.0]);
        assert_eq!(graph.max_node_weight().unwrap(), vec![3.0, 4.0]);
        assert_eq!(graph.max_edge_degree(), 3);
        assert_eq!(
            graph.member_weight_of_edge(EdgeId::from_raw(1)).unwrap(),
            vec![3.0, 4.5]
        );
    }

    #[test]
    fn set_weights_checks_dimension() {
        let mut graph = sample();
        assert!(matches!(
            graph.set_node_weights(NodeId::from_raw(0), &[1.0]),
            Err(HgrError::Dimension(_))
        ));
        graph.set_edge_weights(EdgeId::from_raw(0), &[5.0]).unwrap();
        assert_eq!(graph.edge_weights(EdgeId::from_raw(0)).unwrap(), &[5.0]);
        assert!(matches!(
            graph.edge_weights(EdgeId::from_raw(7)),
            Err(HgrError::Graph(info)) if info.code == "unknown-edge"
        ));
    }
}
