//! Partition quality metrics.
//!
//! A partition result assigns every node an optional block id; `None` marks
//! an unassigned node. An edge is cut when its assigned members span at least
//! two distinct blocks. Unassigned members never make an edge cut.

use std::collections::BTreeSet;

use hgr_core::errors::{ErrorInfo, HgrError};
use hgr_core::stats::imbalance_ratio;
use hgr_core::weights;
use hgr_core::{BlockId, EdgeId, NodeId};

use crate::hypergraph::{EdgeRecord, HyperGraph};

impl HyperGraph {
    /// Sum of the weight vectors of all cut edges.
    pub fn cut_size(&self, part: &[Option<BlockId>]) -> Result<Vec<f64>, HgrError> {
        self.ensure_partition_len(part)?;
        let mut cut = vec![0.0; self.edge_weight_dim()];
        for edge in self.edge_records() {
            if is_cut(edge, part) {
                weights::accumulate(&mut cut, &edge.weights)?;
            }
        }
        Ok(cut)
    }

    /// Sum of the weight vectors of the cut edges incident on `node`.
    pub fn cut_size_of_node(
        &self,
        part: &[Option<BlockId>],
        node: NodeId,
    ) -> Result<Vec<f64>, HgrError> {
        self.ensure_partition_len(part)?;
        let mut cut = vec![0.0; self.edge_weight_dim()];
        for edge in self.edges_of(node)? {
            let record = self.edge(*edge)?;
            if is_cut(record, part) {
                weights::accumulate(&mut cut, &record.weights)?;
            }
        }
        Ok(cut)
    }

    /// Whether `edge` is cut under `part`.
    pub fn is_cut_edge(&self, edge: EdgeId, part: &[Option<BlockId>]) -> Result<bool, HgrError> {
        self.ensure_partition_len(part)?;
        Ok(is_cut(self.edge(edge)?, part))
    }

    /// Per-block sum of node weight vectors.
    ///
    /// Every node must be assigned; the result has `max block id + 1` entries.
    pub fn block_size(&self, part: &[Option<BlockId>]) -> Result<Vec<Vec<f64>>, HgrError> {
        self.ensure_partition_len(part)?;
        let mut sizes: Vec<Vec<f64>> = vec![vec![0.0; self.node_weight_dim()]; block_count(part)];
        for (idx, (node, block)) in self.node_records().iter().zip(part).enumerate() {
            let block = block.ok_or_else(|| {
                HgrError::Partition(
                    ErrorInfo::new("unassigned-node", "block sizes require every node assigned")
                        .with_context("node", idx),
                )
            })?;
            weights::accumulate(&mut sizes[block], &node.weights)?;
        }
        Ok(sizes)
    }

    /// Per-block sum of the weight vectors of cut edges touching the block.
    pub fn block_cut_size(&self, part: &[Option<BlockId>]) -> Result<Vec<Vec<f64>>, HgrError> {
        self.ensure_partition_len(part)?;
        let mut sizes: Vec<Vec<f64>> = vec![vec![0.0; self.edge_weight_dim()]; block_count(part)];
        for edge in self.edge_records() {
            let blocks = blocks_of(edge, part);
            if blocks.len() > 1 {
                for block in blocks {
                    weights::accumulate(&mut sizes[block], &edge.weights)?;
                }
            }
        }
        Ok(sizes)
    }

    /// Per-block, per-dimension imbalance `|mean - size| / mean` of block sizes.
    pub fn block_imbalance(&self, part: &[Option<BlockId>]) -> Result<Vec<Vec<f64>>, HgrError> {
        let sizes = self.block_size(part)?;
        let columns: Vec<Vec<f64>> = (0..self.node_weight_dim())
            .map(|dim| sizes.iter().map(|block| block[dim]).collect())
            .collect();
        Ok(sizes
            .iter()
            .map(|block| {
                block
                    .iter()
                    .zip(&columns)
                    .map(|(value, column)| imbalance_ratio(*value, column))
                    .collect()
            })
            .collect())
    }

    pub(crate) fn ensure_partition_len(&self, part: &[Option<BlockId>]) -> Result<(), HgrError> {
        if part.len() != self.node_count() {
            return Err(HgrError::Partition(
                ErrorInfo::new(
                    "partition-length",
                    "partition result must cover every node of the graph",
                )
                .with_context("expected", self.node_count())
                .with_context("actual", part.len()),
            ));
        }
        Ok(())
    }
}

fn blocks_of(edge: &EdgeRecord, part: &[Option<BlockId>]) -> BTreeSet<BlockId> {
    edge.members
        .iter()
        .filter_map(|member| part[member.index()])
        .collect()
}

fn is_cut(edge: &EdgeRecord, part: &[Option<BlockId>]) -> bool {
    let mut first = None;
    for block in edge.members.iter().filter_map(|member| part[member.index()]) {
        match first {
            None => first = Some(block),
            Some(seen) if seen != block => return true,
            Some(_) => {}
        }
    }
    false
}

fn block_count(part: &[Option<BlockId>]) -> usize {
    part.iter().flatten().max().map(|max| max + 1).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::node_ids;

    fn four_nodes() -> HyperGraph {
        let mut graph = HyperGraph::with_dims(1, 1).unwrap();
        for _ in 0..4 {
            graph.add_node(&[1.0]).unwrap();
        }
        graph.add_edge(&node_ids([0, 1, 2]), &[1.0]).unwrap();
        graph.add_edge(&node_ids([2, 3]), &[2.0]).unwrap();
        graph
    }

    #[test]
    fn only_spanning_edges_are_cut() {
        let graph = four_nodes();
        let part = vec![Some(0), Some(0), Some(1), Some(1)];
        assert_eq!(graph.cut_size(&part).unwrap(), vec![1.0]);
        assert!(graph.is_cut_edge(EdgeId::from_raw(0), &part).unwrap());
        assert!(!graph.is_cut_edge(EdgeId::from_raw(1), &part).unwrap());
    }

    #[test]
    fn unassigned_members_do_not_cut() {
        let graph = four_nodes();
        let part = vec![Some(0), None, None, Some(1)];
        assert_eq!(graph.cut_size(&part).unwrap(), vec![0.0]);
        let part = vec![Some(0), None, Some(1), None];
        assert_eq!(graph.cut_size(&part).unwrap(), vec![1.0]);
    }

    #[test]
    fn cut_of_node() {
        let graph = four_nodes();
        let part = vec![Some(0), Some(0), Some(1), Some(2)];
        assert_eq!(
            graph.cut_size_of_node(&part, NodeId::from_raw(2)).unwrap(),
            vec![3.0]
        );
        assert_eq!(
            graph.cut_size_of_node(&part, NodeId::from_raw(0)).unwrap(),
            vec![1.0]
        );
    }

    #[test]
    fn block_sizes_require_assignment() {
        let graph = four_nodes();
        let sizes = graph.block_size(&[Some(0), Some(2), Some(2), Some(2)]).unwrap();
        assert_eq!(sizes, vec![vec![1.0], vec![0.0], vec![3.0]]);
        let err = graph
            .block_size(&[Some(0), None, Some(1), Some(1)])
            .unwrap_err();
        assert!(matches!(err, HgrError::Partition(info) if info.code == "unassigned-node"));
    }

    #[test]
    fn block_cut_sizes() {
        let graph = four_nodes();
        let cut = graph
            .block_cut_size(&[Some(0), Some(0), Some(1), Some(2)])
            .unwrap();
        assert_eq!(cut, vec![vec![1.0], vec![3.0], vec![2.0]]);
    }

    #[test]
    fn imbalance_against_mean_block() {
        let graph = four_nodes();
        let imbalance = graph
            .block_imbalance(&[Some(0), Some(1), Some(1), Some(1)])
            .unwrap();
        assert_eq!(imbalance, vec![vec![0.5], vec![0.5]]);
    }

    #[test]
    fn partition_length_is_checked() {
        let graph = four_nodes();
        assert!(matches!(
            graph.cut_size(&[Some(0)]),
            Err(HgrError::Partition(info)) if info.code == "partition-length"
        ));
    }
}
