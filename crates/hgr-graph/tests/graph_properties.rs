use hgr_core::errors::HgrError;
use hgr_core::rng::RngHandle;
use hgr_core::{node_ids, NodeId};
use hgr_graph::{canonical_hash, gen_random_hypergraph, GraphConfig, HyperGraph};
use proptest::prelude::*;
use rand::Rng;

fn check_incidence(graph: &HyperGraph) {
    for edge in graph.edges() {
        let members = graph.members_of(edge).unwrap();
        assert!(members.len() >= 2);
        assert!(members.windows(2).all(|pair| pair[0] < pair[1]));
        for member in members {
            assert!(graph.edges_of(*member).unwrap().contains(&edge));
        }
    }
    for node in graph.nodes() {
        for edge in graph.edges_of(node).unwrap() {
            assert!(graph.members_of(*edge).unwrap().contains(&node));
        }
    }
}

fn random_partition(nodes: usize, blocks: usize, rng: &mut RngHandle) -> Vec<Option<usize>> {
    (0..nodes).map(|_| Some(rng.gen_range(0..blocks))).collect()
}

#[test]
fn scenario_cut_size() {
    let mut graph = HyperGraph::with_dims(1, 1).unwrap();
    for _ in 0..4 {
        graph.add_node(&[1.0]).unwrap();
    }
    graph.add_edge(&node_ids([0, 1, 2]), &[1.0]).unwrap();
    graph.add_edge(&node_ids([2, 3]), &[2.0]).unwrap();
    let part = vec![Some(0), Some(0), Some(1), Some(1)];
    assert_eq!(graph.cut_size(&part).unwrap(), vec![1.0]);
    assert_eq!(graph.block_size(&part).unwrap(), vec![vec![2.0], vec![2.0]]);
}

#[test]
fn boundary_errors() {
    let mut graph = HyperGraph::with_dims(2, 1).unwrap();
    let n0 = graph.add_node(&[1.0, 1.0]).unwrap();
    assert!(matches!(
        graph.add_edge(&[n0], &[1.0]),
        Err(HgrError::InvalidEdge(info)) if info.code == "too-few-members"
    ));
    assert!(matches!(
        graph.add_node(&[1.0]),
        Err(HgrError::Dimension(info)) if info.code == "dimension-mismatch"
    ));
    assert!(matches!(
        graph.node_weights(NodeId::from_raw(4)),
        Err(HgrError::Graph(info)) if info.code == "unknown-node"
    ));
    assert!(HyperGraph::new(GraphConfig::new(Vec::new(), vec![1.0])).is_err());
}

proptest! {
    #[test]
    fn random_builds_keep_incidence_symmetric(
        seed in any::<u64>(),
        nodes in 2usize..40,
        edges in 0usize..60,
        degree in 2usize..6,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let graph =
            gen_random_hypergraph(GraphConfig::uniform(2, 1), nodes, edges, degree, &mut rng)
                .unwrap();
        check_incidence(&graph);
        let incidences: usize = graph.nodes().map(|n| graph.edges_of(n).unwrap().len()).sum();
        let memberships: usize = graph.edges().map(|e| graph.edge_degree(e).unwrap()).sum();
        prop_assert_eq!(incidences, memberships);
    }

    #[test]
    fn compression_preserves_cut_and_weight(
        seed in any::<u64>(),
        nodes in 2usize..12,
        edges in 0usize..40,
        blocks in 1usize..4,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let graph =
            gen_random_hypergraph(GraphConfig::uniform(1, 2), nodes, edges, 3, &mut rng).unwrap();
        let compressed = graph.compressed().unwrap();
        check_incidence(&compressed);
        prop_assert!(compressed.edge_count() <= graph.edge_count());
        prop_assert_eq!(
            compressed.total_edge_weight().unwrap(),
            graph.total_edge_weight().unwrap()
        );

        let part = random_partition(nodes, blocks, &mut rng);
        prop_assert_eq!(compressed.cut_size(&part).unwrap(), graph.cut_size(&part).unwrap());
        prop_assert_eq!(
            compressed.block_cut_size(&part).unwrap(),
            graph.block_cut_size(&part).unwrap()
        );
    }

    #[test]
    fn distance_layers_are_disjoint(seed in any::<u64>(), nodes in 2usize..30, hops in 0usize..4) {
        let mut rng = RngHandle::from_seed(seed);
        let graph =
            gen_random_hypergraph(GraphConfig::uniform(1, 1), nodes, nodes, 4, &mut rng).unwrap();
        let layers = graph.distance_layers_from(NodeId::from_raw(0), hops).unwrap();
        prop_assert!(layers.len() <= hops + 1);
        let mut seen: Vec<NodeId> = layers.iter().flatten().copied().collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
        for pair in layers.windows(2) {
            for node in &pair[1] {
                let linked = pair[0]
                    .iter()
                    .any(|prev| graph.has_connection(*prev, *node).unwrap());
                prop_assert!(linked);
            }
        }
    }

    #[test]
    fn snapshots_preserve_hash(seed in any::<u64>(), nodes in 2usize..20) {
        let mut rng = RngHandle::from_seed(seed);
        let graph =
            gen_random_hypergraph(GraphConfig::uniform(2, 2), nodes, nodes * 2, 4, &mut rng)
                .unwrap();
        let bytes = hgr_graph::graph_to_bytes(&graph).unwrap();
        let restored = hgr_graph::graph_from_bytes(&bytes).unwrap();
        prop_assert_eq!(canonical_hash(&graph), canonical_hash(&restored));
        prop_assert_eq!(restored, graph);
    }
}
