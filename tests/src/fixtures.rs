//! Builders for nodes, containers and registries used across the tests.

use fixity_constraint::{
    ConstraintContainer, MultiFreedom, MultiRetained, RetainedBlock, SingleFreedom,
};
use fixity_core::{DofRef, NodeId, NodeTable, PatternTag};
use fixity_hypothesis::HypothesisRegistry;
use ndarray::{array, Array2};
use rand::Rng;

/// DOFs per node in [`grid_nodes`].
pub const GRID_NDOF: usize = 3;

/// Nodes `1..=count`, each with [`GRID_NDOF`] DOFs.
pub fn grid_nodes(count: u64) -> NodeTable {
    let mut nodes = NodeTable::new();
    for id in 1..=count {
        nodes.insert(NodeId::new(id), GRID_NDOF);
    }
    nodes
}

fn node(nodes: &NodeTable, i: usize) -> NodeId {
    NodeId::new(1 + (i % nodes.len()) as u64)
}

/// A container holding `single` fixities/imposed motions, `multi` couplings
/// between neighbouring nodes and `retained` midpoint interpolations.
/// `nodes` must come from [`grid_nodes`] with at least three nodes.
pub fn mixed_container(
    nodes: &NodeTable,
    single: usize,
    multi: usize,
    retained: usize,
) -> ConstraintContainer {
    let mut container = ConstraintContainer::new();

    for i in 0..single {
        let dof = DofRef::new(node(nodes, i), i % GRID_NDOF);
        let value = if i % 2 == 0 { 0.0 } else { 0.001 * i as f64 };
        let sp = SingleFreedom::new(nodes, dof, value, PatternTag::new((i % 2) as u64))
            .expect("fixture fixity");
        container.add(sp).expect("fixture tag");
    }

    for i in 0..multi {
        let scale = 1.0 + i as f64;
        let mf = MultiFreedom::new(
            nodes,
            node(nodes, i + 1),
            vec![0, 1],
            node(nodes, i),
            vec![0, 1, 2],
            array![[scale, 0.0, 0.5], [0.0, scale, -0.5]],
        )
        .expect("fixture coupling")
        .with_constant(array![0.01 * scale, 0.0])
        .expect("fixture constant");
        container.add(mf).expect("fixture tag");
    }

    for i in 0..retained {
        let w = 0.25 + 0.05 * i as f64;
        let mr = MultiRetained::new(
            nodes,
            node(nodes, i + 2),
            vec![0, 1, 2],
            vec![
                RetainedBlock::new(node(nodes, i), vec![0, 1, 2], Array2::eye(3) * w),
                RetainedBlock::new(node(nodes, i + 1), vec![0, 1, 2], Array2::eye(3) * (1.0 - w)),
            ],
        )
        .expect("fixture interpolation");
        container.add(mr).expect("fixture tag");
    }

    container
}

/// A random fixity or imposed motion on a node of [`grid_nodes`].
pub fn random_single_freedom<R: Rng>(rng: &mut R, nodes: &NodeTable) -> SingleFreedom {
    let dof = DofRef::new(
        NodeId::new(rng.gen_range(1..=nodes.len() as u64)),
        rng.gen_range(0..GRID_NDOF),
    );
    let value = if rng.gen_bool(0.5) {
        0.0
    } else {
        rng.gen_range(-0.1..0.1)
    };
    SingleFreedom::new(nodes, dof, value, PatternTag::new(rng.gen_range(0..4)))
        .expect("random fixity")
}

/// A registry with one hypothesis per `(name, fixities)` pair.
pub fn registry_with(nodes: &NodeTable, entries: &[(&str, usize)]) -> HypothesisRegistry {
    let mut registry = HypothesisRegistry::new();
    for &(name, count) in entries {
        let hypothesis = registry.create(name).expect("fixture hypothesis name");
        for i in 0..count {
            let dof = DofRef::new(node(nodes, i / GRID_NDOF), i % GRID_NDOF);
            let sp = SingleFreedom::fixed(nodes, dof, PatternTag::new(0)).expect("fixture fixity");
            hypothesis.add(sp).expect("fixture tag");
        }
    }
    registry
}
