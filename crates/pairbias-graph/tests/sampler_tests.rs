use std::collections::HashMap;

use pairbias_graph::edge::upper_triangle;
use pairbias_graph::{
    sample_graph, Combine, Combiner, CombinerKind, EdgeSet, FinalFold, GraphHash,
};

/// Every graph on `nodes` nodes: one per subset of the pair list.
fn all_graphs(nodes: u32) -> Vec<EdgeSet> {
    let pairs: Vec<(u32, u32)> = upper_triangle(nodes).collect();
    (0u32..1 << pairs.len())
        .map(|mask| {
            EdgeSet::from_pairs(
                pairs
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, pair)| *pair),
            )
            .unwrap()
        })
        .collect()
}

fn assert_no_collisions(nodes: u32, expected_graphs: usize) {
    let graphs = all_graphs(nodes);
    assert_eq!(graphs.len(), expected_graphs);

    let mut seen: HashMap<GraphHash, &EdgeSet> = HashMap::new();
    for graph in &graphs {
        if let Some(previous) = seen.insert(GraphHash::of(graph), graph) {
            panic!("hash collision between {previous} and {graph}");
        }
    }
}

#[test]
fn test_no_hash_collisions_four_nodes() {
    assert_no_collisions(4, 64);
}

#[test]
fn test_no_hash_collisions_five_nodes() {
    assert_no_collisions(5, 1024);
}

#[test]
fn test_hash_ignores_permuted_insertion() {
    let pairs = [(0, 1), (0, 3), (1, 2), (2, 3), (1, 3)];
    let forward = EdgeSet::from_pairs(pairs).unwrap();
    let mut reversed = pairs;
    reversed.reverse();
    let flipped = pairs.map(|(a, b)| (b, a));

    let expected = GraphHash::of(&forward);
    assert_eq!(GraphHash::of(&EdgeSet::from_pairs(reversed).unwrap()), expected);
    assert_eq!(GraphHash::of(&EdgeSet::from_pairs(flipped).unwrap()), expected);
}

#[test]
fn test_independent_probability_one_gives_complete_graph() {
    let mut combiner = Combiner::new(CombinerKind::Independent, 11, FinalFold::Xor);
    for nodes in [4, 6] {
        for _ in 0..100 {
            let edges = sample_graph(&mut combiner, nodes, 1.0).unwrap();
            assert_eq!(edges, EdgeSet::complete(nodes));
        }
    }
}

#[test]
fn test_independent_probability_zero_gives_empty_graph() {
    let mut combiner = Combiner::new(CombinerKind::Independent, 11, FinalFold::Xor);
    for _ in 0..100 {
        assert!(sample_graph(&mut combiner, 6, 0.0).unwrap().is_empty());
    }
}

#[test]
fn test_every_strategy_samples_valid_graphs() {
    for kind in CombinerKind::ALL {
        let mut combiner = Combiner::new(kind, 2024, FinalFold::Pow);
        for _ in 0..50 {
            let edges = sample_graph(&mut combiner, 5, 0.5).unwrap();
            assert!(edges.len() <= 10, "{}", combiner.name());
            assert!(edges.edges().iter().all(|e| e.p1() < e.p2() && e.p2() < 5));
        }
    }
}

#[test]
fn test_same_seed_same_graph_sequence() {
    for kind in CombinerKind::ALL {
        let mut a = Combiner::new(kind, 99, FinalFold::Xor);
        let mut b = Combiner::new(kind, 99, FinalFold::Xor);
        for _ in 0..20 {
            assert_eq!(
                sample_graph(&mut a, 4, 0.5).unwrap(),
                sample_graph(&mut b, 4, 0.5).unwrap()
            );
        }
    }
}
