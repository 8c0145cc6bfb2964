//! Tags are strictly increasing and never reissued, for any add/remove sequence.

use std::collections::BTreeSet;

use fixity_tests::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn run_sequence(seed: u64, steps: usize) {
    let nodes = grid_nodes(8);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut container = ConstraintContainer::new();
    let mut issued: Vec<ConstraintTag> = Vec::new();
    let mut live: BTreeSet<ConstraintTag> = BTreeSet::new();

    for _ in 0..steps {
        match rng.gen_range(0..10) {
            // add a fixity
            0..=3 => {
                let tag = container.add(random_single_freedom(&mut rng, &nodes)).unwrap();
                issued.push(tag);
                live.insert(tag);
            }
            // add a coupling between two distinct nodes
            4..=5 => {
                let a = rng.gen_range(1..=8);
                let b = 1 + a % 8;
                let mf = MultiFreedom::equal_dof(&nodes, NodeId::new(a), NodeId::new(b), &[0, 1])
                    .unwrap();
                let tag = container.add(mf).unwrap();
                issued.push(tag);
                live.insert(tag);
            }
            // remove a live tag
            6..=8 => {
                if let Some(&tag) = live.iter().nth(rng.gen_range(0..live.len().max(1))) {
                    assert!(container.remove(tag).is_some());
                    live.remove(&tag);
                }
            }
            // remove everything
            _ => {
                container.clear();
                live.clear();
            }
        }
        assert_eq!(container.len(), live.len());
    }

    assert!(
        issued.windows(2).all(|w| w[0] < w[1]),
        "seed {}: tags not strictly increasing",
        seed
    );
    let distinct: BTreeSet<_> = issued.iter().collect();
    assert_eq!(distinct.len(), issued.len(), "seed {}: tag reissued", seed);
    assert_eq!(container.tags().into_iter().collect::<BTreeSet<_>>(), live);
}

#[test]
fn test_random_sequences() {
    for seed in 0..32 {
        run_sequence(seed, 200);
    }
}

#[test]
fn test_tags_shared_across_variants() {
    let nodes = grid_nodes(3);
    let mut container = ConstraintContainer::new();

    let first = |single, multi, retained| {
        mixed_container(&nodes, single, multi, retained)
            .remove(ConstraintTag::new(0))
            .unwrap()
    };
    let a = container.add(first(1, 0, 0)).unwrap();
    let b = container.add(first(0, 1, 0)).unwrap();
    let c = container.add(first(0, 0, 1)).unwrap();

    assert_eq!(
        vec![a, b, c],
        vec![ConstraintTag::new(0), ConstraintTag::new(1), ConstraintTag::new(2)]
    );
    Counts::new().single(1).multi(1).retained(1).assert(&container);
}

#[test]
fn test_hypothesis_tags_survive_transfer() {
    // GIVEN - a sender that has issued and retired several hypothesis tags
    let nodes = grid_nodes(2);
    let mut source = registry_with(&nodes, &[("a", 1), ("b", 1), ("c", 1)]);
    source.remove("a", &mut |_: &str, _: &Hypothesis| {});
    let config = ExchangeConfig::default();
    let bytes = encode_nested(&source, &config).unwrap();

    // WHEN
    let mut target = HypothesisRegistry::new();
    decode_nested(&mut target, &bytes, &config).unwrap();

    // THEN - new hypotheses on the receiver never reuse a tag the sender issued
    let fresh = target.create("d").unwrap().tag();
    assert!(fresh >= source.next_tag());
}
