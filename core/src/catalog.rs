//! Node catalog: the mesh-layer view the constraint model validates against.
//!
//! Constraints store node ids only. Construction asks the catalog whether the
//! node exists and how many DOFs it carries, so invalid references are
//! rejected up front instead of clamped later.

use crate::{DofRef, ModelError, ModelResult, NodeId};
use std::collections::BTreeMap;

/// Resolves node ids to their number of degrees of freedom.
pub trait NodeCatalog {
    /// Number of DOFs of `node`, or `None` if the node is unknown.
    fn dof_count(&self, node: NodeId) -> Option<usize>;

    /// Check if the node exists.
    fn contains(&self, node: NodeId) -> bool {
        self.dof_count(node).is_some()
    }

    /// Validate that `node` exists, returning its DOF count.
    fn require_node(&self, node: NodeId) -> ModelResult<usize> {
        self.dof_count(node).ok_or(ModelError::UnknownNode(node))
    }

    /// Validate a single DOF reference.
    fn require_dof(&self, dof: DofRef) -> ModelResult<()> {
        let ndof = self.require_node(dof.node)?;
        if dof.dof >= ndof {
            return Err(ModelError::dof_out_of_range(dof, ndof));
        }
        Ok(())
    }

    /// Validate a list of DOF indices on one node.
    fn require_dofs(&self, node: NodeId, dofs: &[usize]) -> ModelResult<()> {
        let ndof = self.require_node(node)?;
        match dofs.iter().find(|&&d| d >= ndof) {
            Some(&bad) => Err(ModelError::dof_out_of_range(DofRef::new(node, bad), ndof)),
            None => Ok(()),
        }
    }
}

/// In-memory node table, keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    nodes: BTreeMap<NodeId, usize>,
}

impl NodeTable {
    /// Create an empty node table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with `ndof` degrees of freedom, replacing any previous entry.
    pub fn insert(&mut self, node: NodeId, ndof: usize) {
        self.nodes.insert(node, ndof);
    }

    /// Builder-style registration.
    pub fn with_node(mut self, node: NodeId, ndof: usize) -> Self {
        self.insert(node, ndof);
        self
    }

    /// Remove a node.
    pub fn remove(&mut self, node: NodeId) -> Option<usize> {
        self.nodes.remove(&node)
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl NodeCatalog for NodeTable {
    fn dof_count(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(&node).copied()
    }
}
