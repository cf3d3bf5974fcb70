//! Hierarchical hypergraphs built by clustering a parent level.
//!
//! A child level holds one node per cluster of parent nodes and re-creates
//! every parent hyperedge that still spans at least two child nodes. Results
//! computed on a child (block ids, grid locations) are moved back to the
//! parent through the child-to-parent map.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::sync::Arc;

use hgr_core::errors::{ErrorInfo, HgrError};
use hgr_core::weights;
use hgr_core::{BlockId, Coordinate2D, EdgeId, NodeId, PartResult};
use tracing::debug;

use crate::config::{ClusterOptions, GraphConfig};
use crate::hypergraph::{unknown_node, HyperGraph};

/// A [`HyperGraph`] that knows which parent-level nodes each of its nodes
/// was clustered from.
///
/// Parents are shared through [`Arc`], so several children may coarsen the
/// same level and whole hierarchies can move between threads. A child never
/// mutates its parent, and only root graphs accept new nodes or edges.
#[derive(Debug, Clone)]
pub struct HierHyperGraph {
    graph: HyperGraph,
    parent: Option<Arc<HierHyperGraph>>,
    child_to_parent: Vec<Vec<NodeId>>,
    virtual_nodes: Vec<bool>,
    fixed_nodes: BTreeMap<NodeId, BlockId>,
}

impl Deref for HierHyperGraph {
    type Target = HyperGraph;

    fn deref(&self) -> &HyperGraph {
        &self.graph
    }
}

impl HierHyperGraph {
    /// Creates an empty root graph.
    pub fn new(config: GraphConfig) -> Result<Self, HgrError> {
        Ok(Self::from_graph(HyperGraph::new(config)?))
    }

    /// Wraps a flat graph as the root of a hierarchy.
    pub fn from_graph(graph: HyperGraph) -> Self {
        let node_count = graph.node_count();
        Self {
            graph,
            parent: None,
            child_to_parent: vec![Vec::new(); node_count],
            virtual_nodes: vec![false; node_count],
            fixed_nodes: BTreeMap::new(),
        }
    }

    /// Appends a node to a root graph.
    pub fn add_node(&mut self, weights: &[f64]) -> Result<NodeId, HgrError> {
        self.ensure_root("add-node")?;
        let id = self.graph.add_node(weights)?;
        self.child_to_parent.push(Vec::new());
        self.virtual_nodes.push(false);
        Ok(id)
    }

    /// Appends a hyperedge to a root graph.
    pub fn add_edge(&mut self, members: &[NodeId], weights: &[f64]) -> Result<EdgeId, HgrError> {
        self.ensure_root("add-edge")?;
        self.graph.add_edge(members, weights)
    }

    /// Builds a child level with one node per cluster.
    ///
    /// Child node weights are the sums of their parents' weights and fixed
    /// block assignments are inherited when the parents agree. Parent nodes
    /// outside every cluster are external; with
    /// [`ClusterOptions::include_virtual_boundary_nodes`] each external node
    /// touching a boundary hyperedge gets a zero-weight virtual child node so
    /// the hyperedge survives.
    pub fn cluster(
        parent: &Arc<HierHyperGraph>,
        clusters: &[Vec<NodeId>],
        options: ClusterOptions,
    ) -> Result<Self, HgrError> {
        let mut parent_to_child = map_clusters(parent, clusters)?;
        let mut child = Self::empty_child(parent, parent.config().clone())?;

        for members in clusters {
            let mut summed = vec![0.0; parent.node_weight_dim()];
            for member in members {
                weights::accumulate(&mut summed, parent.node_weights(*member)?)?;
            }
            child.push_cluster_node(parent, members, &summed)?;
        }
        let real_nodes = child.node_count();

        let mut dropped = 0usize;
        for edge in parent.edges() {
            let mut child_members = BTreeSet::new();
            let mut external = Vec::new();
            for member in parent.members_of(edge)? {
                match parent_to_child[member.index()] {
                    Some(child_id) if child_id.index() < real_nodes => {
                        child_members.insert(child_id);
                    }
                    _ => external.push(*member),
                }
            }

            if options.include_virtual_boundary_nodes
                && !child_members.is_empty()
                && !external.is_empty()
            {
                for member in external {
                    let child_id = match parent_to_child[member.index()] {
                        Some(existing) => existing,
                        None => {
                            let id = child.push_virtual_node(member)?;
                            parent_to_child[member.index()] = Some(id);
                            id
                        }
                    };
                    child_members.insert(child_id);
                }
            }

            if child_members.len() > 1 {
                let members: Vec<NodeId> = child_members.into_iter().collect();
                child.graph.add_edge(&members, parent.edge_weights(edge)?)?;
            } else {
                dropped += 1;
            }
        }

        debug!(
            level = child.level(),
            parent_nodes = parent.node_count(),
            nodes = child.node_count(),
            virtual_nodes = child.node_count() - real_nodes,
            edges = child.edge_count(),
            dropped_edges = dropped,
            "built clustered child graph"
        );
        Ok(child)
    }

    /// Builds a child level whose node weights are split by the parent's
    /// current block assignment.
    ///
    /// Each child weight vector is `block_count` concatenated copies of the
    /// parent dimension; slot `b` sums the parents assigned to block `b`.
    /// External parent nodes are ignored and no virtual nodes are created.
    pub fn cluster_by_block(
        parent: &Arc<HierHyperGraph>,
        clusters: &[Vec<NodeId>],
        block_count: usize,
        parent_part: &[Option<BlockId>],
    ) -> Result<Self, HgrError> {
        if block_count == 0 {
            return Err(HgrError::Clustering(ErrorInfo::new(
                "zero-blocks",
                "block-disaggregated clustering requires at least one block",
            )));
        }
        parent.ensure_partition_len(parent_part)?;
        let parent_to_child = map_clusters(parent, clusters)?;

        let base_dim = parent.node_weight_dim();
        let factor = parent.node_weight_factor().repeat(block_count);
        let config = GraphConfig::new(factor, parent.edge_weight_factor().to_vec());
        let mut child = Self::empty_child(parent, config)?;

        for members in clusters {
            let mut summed = vec![0.0; base_dim * block_count];
            for member in members {
                let block = parent_part[member.index()]
                    .filter(|block| *block < block_count)
                    .ok_or_else(|| {
                        HgrError::Clustering(
                            ErrorInfo::new(
                                "invalid-parent-block",
                                "clustered parent node needs a block id below the block count",
                            )
                            .with_context("parent", member.as_raw())
                            .with_context("block_count", block_count),
                        )
                    })?;
                let offset = block * base_dim;
                weights::accumulate(
                    &mut summed[offset..offset + base_dim],
                    parent.node_weights(*member)?,
                )?;
            }
            child.push_cluster_node(parent, members, &summed)?;
        }

        for edge in parent.edges() {
            let members: BTreeSet<NodeId> = parent
                .members_of(edge)?
                .iter()
                .filter_map(|member| parent_to_child[member.index()])
                .collect();
            if members.len() > 1 {
                let members: Vec<NodeId> = members.into_iter().collect();
                child.graph.add_edge(&members, parent.edge_weights(edge)?)?;
            }
        }

        debug!(
            level = child.level(),
            blocks = block_count,
            nodes = child.node_count(),
            edges = child.edge_count(),
            "built block-disaggregated child graph"
        );
        Ok(child)
    }

    /// The underlying flat graph.
    pub fn graph(&self) -> &HyperGraph {
        &self.graph
    }

    /// Consumes the hierarchy node and returns its flat graph.
    pub fn into_graph(self) -> HyperGraph {
        self.graph
    }

    /// The level this graph was clustered from, `None` for a root.
    pub fn parent(&self) -> Option<&Arc<HierHyperGraph>> {
        self.parent.as_ref()
    }

    /// Whether this graph is the root of its hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Depth below the root; the root is level `0`.
    pub fn level(&self) -> usize {
        let mut level = 0;
        let mut current = self.parent.as_deref();
        while let Some(graph) = current {
            level += 1;
            current = graph.parent.as_deref();
        }
        level
    }

    /// Parent-level nodes a node was clustered from; empty on a root.
    pub fn parents_of_node(&self, node: NodeId) -> Result<&[NodeId], HgrError> {
        self.child_to_parent
            .get(node.index())
            .map(Vec::as_slice)
            .ok_or_else(|| unknown_node(node))
    }

    /// Root-level nodes that ultimately make up `node`.
    pub fn root_parents_of_node(&self, node: NodeId) -> Result<Vec<NodeId>, HgrError> {
        let parents = self.parents_of_node(node)?;
        match &self.parent {
            None => Ok(vec![node]),
            Some(parent) => {
                let mut roots = Vec::new();
                for member in parents {
                    roots.extend(parent.root_parents_of_node(*member)?);
                }
                Ok(roots)
            }
        }
    }

    /// Whether `node` is a virtual boundary node.
    pub fn is_virtual_node(&self, node: NodeId) -> Result<bool, HgrError> {
        self.virtual_nodes
            .get(node.index())
            .copied()
            .ok_or_else(|| unknown_node(node))
    }

    /// Number of virtual boundary nodes.
    pub fn virtual_node_count(&self) -> usize {
        self.virtual_nodes.iter().filter(|v| **v).count()
    }

    /// Nodes pre-assigned to a block.
    pub fn fixed_nodes(&self) -> &BTreeMap<NodeId, BlockId> {
        &self.fixed_nodes
    }

    /// Replaces the fixed block assignments.
    pub fn set_fixed_nodes(&mut self, fixed: BTreeMap<NodeId, BlockId>) -> Result<(), HgrError> {
        if let Some(node) = fixed.keys().find(|node| node.index() >= self.node_count()) {
            return Err(unknown_node(*node));
        }
        self.fixed_nodes = fixed;
        Ok(())
    }

    /// Writes the block of every child node into each of its parent nodes.
    ///
    /// Parent entries not covered by any child node are left untouched.
    pub fn update_part_result_of_parent(
        &self,
        child_part: &[Option<BlockId>],
        parent_part: &mut [Option<BlockId>],
    ) -> Result<(), HgrError> {
        let parent = self.propagation_parent(child_part.len())?;
        ensure_len("parent partition", parent.node_count(), parent_part.len())?;
        for (members, block) in self.child_to_parent.iter().zip(child_part) {
            for member in members {
                parent_part[member.index()] = *block;
            }
        }
        Ok(())
    }

    /// Expands a child partition to the parent level; uncovered parents stay `None`.
    pub fn part_result_of_parent(
        &self,
        child_part: &[Option<BlockId>],
    ) -> Result<PartResult, HgrError> {
        let parent = self.propagation_parent(child_part.len())?;
        let mut parent_part = vec![None; parent.node_count()];
        self.update_part_result_of_parent(child_part, &mut parent_part)?;
        Ok(parent_part)
    }

    /// Derives a child partition from a parent partition.
    ///
    /// Unassigned parents carry no information. Two assigned parents of the
    /// same child node in different blocks are an inconsistency and fail.
    pub fn part_result_from_parent(
        &self,
        parent_part: &[Option<BlockId>],
    ) -> Result<PartResult, HgrError> {
        let parent = self.parent_graph()?;
        ensure_len("parent partition", parent.node_count(), parent_part.len())?;
        let mut child_part: PartResult = vec![None; self.node_count()];
        for (child, members) in self.child_to_parent.iter().enumerate() {
            for member in members {
                let Some(block) = parent_part[member.index()] else {
                    continue;
                };
                match child_part[child] {
                    None => child_part[child] = Some(block),
                    Some(existing) if existing != block => {
                        return Err(HgrError::Propagation(
                            ErrorInfo::new(
                                "inconsistent-partition",
                                "parent nodes of one child node are assigned to different blocks",
                            )
                            .with_context("child", child)
                            .with_context("parent", member.as_raw())
                            .with_context("blocks", format!("{existing},{block}")),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(child_part)
    }

    /// Writes the location of every child node into each of its parent nodes.
    ///
    /// No consistency check is made; the last writer wins.
    pub fn update_loc_of_parent(
        &self,
        child_locs: &[Coordinate2D],
        parent_locs: &mut [Coordinate2D],
    ) -> Result<(), HgrError> {
        let parent = self.propagation_parent(child_locs.len())?;
        ensure_len("parent locations", parent.node_count(), parent_locs.len())?;
        for (members, loc) in self.child_to_parent.iter().zip(child_locs) {
            for member in members {
                parent_locs[member.index()] = *loc;
            }
        }
        Ok(())
    }

    /// Expands child locations to the parent level; uncovered parents are `None`.
    pub fn loc_of_parent(
        &self,
        child_locs: &[Coordinate2D],
    ) -> Result<Vec<Option<Coordinate2D>>, HgrError> {
        let parent = self.propagation_parent(child_locs.len())?;
        let mut parent_locs = vec![None; parent.node_count()];
        for (members, loc) in self.child_to_parent.iter().zip(child_locs) {
            for member in members {
                parent_locs[member.index()] = Some(*loc);
            }
        }
        Ok(parent_locs)
    }

    fn empty_child(parent: &Arc<HierHyperGraph>, config: GraphConfig) -> Result<Self, HgrError> {
        Ok(Self {
            graph: HyperGraph::new(config)?,
            parent: Some(Arc::clone(parent)),
            child_to_parent: Vec::new(),
            virtual_nodes: Vec::new(),
            fixed_nodes: BTreeMap::new(),
        })
    }

    fn push_cluster_node(
        &mut self,
        parent: &HierHyperGraph,
        members: &[NodeId],
        weights: &[f64],
    ) -> Result<NodeId, HgrError> {
        let fixed: BTreeSet<BlockId> = members
            .iter()
            .filter_map(|member| parent.fixed_nodes.get(member).copied())
            .collect();
        if fixed.len() > 1 {
            return Err(HgrError::Clustering(
                ErrorInfo::new(
                    "ambiguous-fixed-block",
                    "parents of one cluster are fixed to different blocks",
                )
                .with_context("cluster", self.node_count())
                .with_context(
                    "blocks",
                    fixed
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(","),
                ),
            ));
        }
        let id = self.graph.add_node(weights)?;
        self.child_to_parent.push(members.to_vec());
        self.virtual_nodes.push(false);
        if let Some(block) = fixed.into_iter().next() {
            self.fixed_nodes.insert(id, block);
        }
        Ok(id)
    }

    fn push_virtual_node(&mut self, parent_node: NodeId) -> Result<NodeId, HgrError> {
        let weights = vec![0.0; self.node_weight_dim()];
        let id = self.graph.add_node(&weights)?;
        self.child_to_parent.push(vec![parent_node]);
        self.virtual_nodes.push(true);
        Ok(id)
    }

    fn ensure_root(&self, operation: &str) -> Result<(), HgrError> {
        if !self.is_root() {
            return Err(HgrError::Graph(
                ErrorInfo::new(
                    "immutable-child",
                    "only root graphs accept structural changes",
                )
                .with_context("operation", operation)
                .with_context("level", self.level()),
            ));
        }
        Ok(())
    }

    fn parent_graph(&self) -> Result<&HierHyperGraph, HgrError> {
        self.parent.as_deref().ok_or_else(|| {
            HgrError::Propagation(ErrorInfo::new(
                "root-graph",
                "a root graph has no parent level to propagate to or from",
            ))
        })
    }

    fn propagation_parent(&self, child_len: usize) -> Result<&HierHyperGraph, HgrError> {
        let parent = self.parent_graph()?;
        ensure_len("child result", self.node_count(), child_len)?;
        Ok(parent)
    }
}

/// Validates a clustering against `parent` and returns the parent-to-child map.
fn map_clusters(
    parent: &HierHyperGraph,
    clusters: &[Vec<NodeId>],
) -> Result<Vec<Option<NodeId>>, HgrError> {
    let mut parent_to_child: Vec<Option<NodeId>> = vec![None; parent.node_count()];
    for (cluster, members) in clusters.iter().enumerate() {
        for member in members {
            let slot = parent_to_child.get_mut(member.index()).ok_or_else(|| {
                HgrError::Clustering(
                    ErrorInfo::new("parent-out-of-range", "cluster member is not a parent node")
                        .with_context("cluster", cluster)
                        .with_context("parent", member.as_raw())
                        .with_context("parent_nodes", parent.node_count()),
                )
            })?;
            if let Some(previous) = *slot {
                return Err(HgrError::Clustering(
                    ErrorInfo::new(
                        "duplicate-member",
                        "parent node is included in more than one cluster",
                    )
                    .with_context("parent", member.as_raw())
                    .with_context("first_cluster", previous.as_raw())
                    .with_context("second_cluster", cluster),
                ));
            }
            if parent.virtual_nodes[member.index()] {
                return Err(HgrError::Clustering(
                    ErrorInfo::new(
                        "virtual-member",
                        "virtual boundary nodes cannot be clustered",
                    )
                    .with_context("cluster", cluster)
                    .with_context("parent", member.as_raw()),
                ));
            }
            *slot = Some(NodeId::from_index(cluster));
        }
    }
    Ok(parent_to_child)
}

fn ensure_len(what: &str, expected: usize, actual: usize) -> Result<(), HgrError> {
    if expected != actual {
        return Err(HgrError::Propagation(
            ErrorInfo::new("length-mismatch", format!("{what} has the wrong length"))
                .with_context("expected", expected)
                .with_context("actual", actual),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::node_ids;

    fn root() -> Arc<HierHyperGraph> {
        let mut graph = HierHyperGraph::new(GraphConfig::uniform(1, 1)).unwrap();
        for weight in [1.0, 2.0, 3.0, 4.0] {
            graph.add_node(&[weight]).unwrap();
        }
        graph.add_edge(&node_ids([0, 1, 2]), &[1.0]).unwrap();
        graph.add_edge(&node_ids([2, 3]), &[2.0]).unwrap();
        Arc::new(graph)
    }

    #[test]
    fn child_sums_weights_and_induces_edges() {
        let root = root();
        let clusters = vec![node_ids([0, 1]), node_ids([2]), node_ids([3])];
        let child = HierHyperGraph::cluster(&root, &clusters, ClusterOptions::default()).unwrap();
        assert_eq!(child.node_count(), 3);
        assert_eq!(child.edge_count(), 2);
        assert_eq!(child.node_weights(NodeId::from_raw(0)).unwrap(), &[3.0]);
        assert_eq!(
            child.members_of(EdgeId::from_raw(0)).unwrap(),
            node_ids([0, 1]).as_slice()
        );
        assert_eq!(child.edge_weights(EdgeId::from_raw(1)).unwrap(), &[2.0]);
        assert_eq!(child.level(), 1);
        assert!(!child.is_root());
    }

    #[test]
    fn children_are_structurally_frozen() {
        let root = root();
        let mut child =
            HierHyperGraph::cluster(&root, &[node_ids([0, 1, 2, 3])], ClusterOptions::default())
                .unwrap();
        assert_eq!(child.edge_count(), 0);
        let err = child.add_node(&[1.0]).unwrap_err();
        assert!(matches!(err, HgrError::Graph(info) if info.code == "immutable-child"));
    }

    #[test]
    fn root_has_no_propagation_target() {
        let root = root();
        let err = root.part_result_of_parent(&[Some(0); 4]).unwrap_err();
        assert!(matches!(err, HgrError::Propagation(info) if info.code == "root-graph"));
        assert_eq!(root.level(), 0);
        assert_eq!(
            root.root_parents_of_node(NodeId::from_raw(2)).unwrap(),
            node_ids([2])
        );
    }
}
