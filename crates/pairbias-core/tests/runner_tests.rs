use pairbias_core::{compare, run_trials, TestOutcome, TrialConfig};
use pairbias_graph::edge::pair_count;
use pairbias_graph::{Combine, Combiner, CombinerKind, EdgeSet, FinalFold, GraphHash, NodeIndex};

/// Never produces an edge.
struct AlwaysEmpty;

impl Combine for AlwaysEmpty {
    fn name(&self) -> &str {
        "always_empty"
    }

    fn draw_pairs(&mut self, nodes: NodeIndex) -> Vec<f64> {
        vec![0.999; pair_count(nodes)]
    }
}

fn config(repetitions: u64) -> TrialConfig {
    TrialConfig {
        nodes: 4,
        repetitions,
        edge_prob: 0.5,
        seed: 3,
        final_fold: FinalFold::Xor,
    }
}

#[test]
fn test_independent_counts_sum_to_repetitions() {
    let mut combiner = Combiner::new(CombinerKind::Independent, 3, FinalFold::Xor);
    let run = run_trials(&mut combiner, &config(10_000)).unwrap();

    assert_eq!(run.combiner, "independent");
    assert_eq!(run.table.total(), 10_000);
    let summed: u64 = run.table.iter().map(|(_, entry)| entry.count).sum();
    assert_eq!(summed, 10_000);
    // 64 possible graphs at about 156 hits each: all of them show up.
    assert_eq!(run.table.distinct(), 64);
}

#[test]
fn test_every_strategy_counts_sum_to_repetitions() {
    for kind in CombinerKind::ALL {
        let mut combiner = Combiner::new(kind, 17, FinalFold::Xor);
        let run = run_trials(&mut combiner, &config(2_000)).unwrap();
        assert_eq!(run.table.total(), 2_000, "{kind}");
        assert!(run.table.distinct() <= 64, "{kind}");
    }
}

#[test]
fn test_representatives_hash_to_their_key() {
    let mut combiner = Combiner::new(CombinerKind::RawBits, 5, FinalFold::Xor);
    let run = run_trials(&mut combiner, &config(1_000)).unwrap();
    for (hash, entry) in run.table.iter() {
        assert_eq!(&GraphHash::of(&entry.representative), hash);
    }
}

#[test]
fn test_same_seed_same_table() {
    let mut a = Combiner::new(CombinerKind::ModuloSum, 8, FinalFold::Xor);
    let mut b = Combiner::new(CombinerKind::ModuloSum, 8, FinalFold::Xor);
    let run_a = run_trials(&mut a, &config(3_000)).unwrap();
    let run_b = run_trials(&mut b, &config(3_000)).unwrap();
    assert_eq!(run_a.table, run_b.table);
}

#[test]
fn test_biased_stub_detected() {
    let mut baseline = Combiner::new(CombinerKind::Independent, 1, FinalFold::Xor);
    let baseline_run = run_trials(&mut baseline, &config(10_000)).unwrap();

    let mut stub = AlwaysEmpty;
    let stub_run = run_trials(&mut stub, &config(10_000)).unwrap();
    assert_eq!(stub_run.table.distinct(), 1);
    assert_eq!(stub_run.table.count(&GraphHash::of(&EdgeSet::empty())), 10_000);

    let result = compare(&baseline_run.table, &[(stub_run.combiner.as_str(), &stub_run.table)]);
    let p_value = result.p_value("always_empty").unwrap();
    assert!(p_value < 1e-6, "p = {p_value}");
}

#[test]
fn test_self_comparison_not_significant() {
    let mut a = Combiner::new(CombinerKind::Independent, 21, FinalFold::Xor);
    let mut b = Combiner::new(CombinerKind::Independent, 21, FinalFold::Xor);
    let run_a = run_trials(&mut a, &config(10_000)).unwrap();
    let run_b = run_trials(&mut b, &config(10_000)).unwrap();

    let result = compare(&run_a.table, &[("copy", &run_b.table)]);
    match result.get("copy") {
        Some(TestOutcome::Tested { statistic, p_value, dof }) => {
            assert_eq!(*statistic, 0.0);
            assert_eq!(*p_value, 1.0);
            assert_eq!(*dof, 63);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}
