use std::collections::{BTreeSet, VecDeque};

use bitvec::prelude::*;
use hgr_core::errors::HgrError;
use hgr_core::NodeId;

use crate::hypergraph::{unknown_node, HyperGraph};

impl HyperGraph {
    /// Nodes sharing at least one hyperedge with `node`, sorted, excluding `node`.
    pub fn neighbors_of(&self, node: NodeId) -> Result<Vec<NodeId>, HgrError> {
        let mut neighbors = BTreeSet::new();
        for edge in &self.node(node)?.edges {
            for member in &self.edge(*edge)?.members {
                if *member != node {
                    neighbors.insert(*member);
                }
            }
        }
        Ok(neighbors.into_iter().collect())
    }

    /// Whether `a` and `b` co-occur in some hyperedge.
    pub fn has_connection(&self, a: NodeId, b: NodeId) -> Result<bool, HgrError> {
        self.node(b)?;
        for edge in &self.node(a)?.edges {
            if self.edge(*edge)?.members.binary_search(&b).is_ok() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Breadth-first layers around a single seed; see [`HyperGraph::distance_layers`].
    pub fn distance_layers_from(
        &self,
        seed: NodeId,
        max_distance: usize,
    ) -> Result<Vec<Vec<NodeId>>, HgrError> {
        self.distance_layers(&[seed], max_distance)
    }

    /// Groups nodes by hop distance from the seed set, up to `max_distance`.
    ///
    /// Layer `0` holds the (deduplicated) seeds. Every reachable node appears
    /// in exactly one layer, the first one that reaches it. Trailing layers
    /// are omitted once the frontier is exhausted. An empty seed set yields no
    /// layers.
    pub fn distance_layers(
        &self,
        seeds: &[NodeId],
        max_distance: usize,
    ) -> Result<Vec<Vec<NodeId>>, HgrError> {
        if seeds.is_empty() {
            return Ok(Vec::new());
        }
        let mut visited = bitvec![usize, Lsb0; 0; self.node_count()];
        let mut distance = vec![0usize; self.node_count()];
        let mut queue = VecDeque::new();
        let mut layers: Vec<Vec<NodeId>> = vec![Vec::new()];

        for seed in seeds {
            if seed.index() >= self.node_count() {
                return Err(unknown_node(*seed));
            }
            if !visited[seed.index()] {
                visited.set(seed.index(), true);
                layers[0].push(*seed);
                queue.push_back(*seed);
            }
        }

        while let Some(current) = queue.pop_front() {
            let next = distance[current.index()] + 1;
            if next > max_distance {
                continue;
            }
            for neighbor in self.neighbors_of(current)? {
                if visited[neighbor.index()] {
                    continue;
                }
                visited.set(neighbor.index(), true);
                distance[neighbor.index()] = next;
                if layers.len() <= next {
                    layers.push(Vec::new());
                }
                layers[next].push(neighbor);
                queue.push_back(neighbor);
            }
        }

        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::node_ids;

    // 0 - 1 - 2 - 3 - 4 chain with one triple edge {1, 5, 6}
    fn chain() -> HyperGraph {
        let mut graph = HyperGraph::with_dims(1, 1).unwrap();
        for _ in 0..7 {
            graph.add_node(&[1.0]).unwrap();
        }
        for pair in [[0, 1], [1, 2], [2, 3], [3, 4]] {
            graph.add_edge(&node_ids(pair), &[1.0]).unwrap();
        }
        graph.add_edge(&node_ids([1, 5, 6]), &[1.0]).unwrap();
        graph
    }

    #[test]
    fn neighbors_and_connections() {
        let graph = chain();
        assert_eq!(
            graph.neighbors_of(NodeId::from_raw(1)).unwrap(),
            node_ids([0, 2, 5, 6])
        );
        assert!(graph
            .has_connection(NodeId::from_raw(5), NodeId::from_raw(6))
            .unwrap());
        assert!(!graph
            .has_connection(NodeId::from_raw(0), NodeId::from_raw(2))
            .unwrap());
    }

    #[test]
    fn single_seed_layers() {
        let graph = chain();
        let layers = graph.distance_layers_from(NodeId::from_raw(0), 2).unwrap();
        assert_eq!(
            layers,
            vec![node_ids([0]), node_ids([1]), node_ids([2, 5, 6])]
        );
    }

    #[test]
    fn multi_seed_layers_partition_reached_nodes() {
        let graph = chain();
        let layers = graph.distance_layers(&node_ids([0, 4, 0]), 10).unwrap();
        assert_eq!(layers[0], node_ids([0, 4]));
        assert_eq!(layers[1], node_ids([1, 3]));
        assert_eq!(layers[2], node_ids([2, 5, 6]));
        assert_eq!(layers.len(), 3);
        let total: usize = layers.iter().map(Vec::len).sum();
        assert_eq!(total, graph.node_count());
    }

    #[test]
    fn zero_distance_keeps_only_seeds() {
        let graph = chain();
        let layers = graph.distance_layers_from(NodeId::from_raw(3), 0).unwrap();
        assert_eq!(layers, vec![node_ids([3])]);
        assert!(graph.distance_layers(&[], 3).unwrap().is_empty());
        assert!(graph.distance_layers(&node_ids([42]), 1).is_err());
    }
}
