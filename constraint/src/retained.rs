//! Multi-retained multi-freedom constraints.

use fixity_core::{DofRef, ModelError, ModelResult, NodeCatalog, NodeId};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::row::LinearRow;

/// One retained node and its weight sub-matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainedBlock {
    node: NodeId,
    dofs: Vec<usize>,
    weights: Array2<f64>,
}

impl RetainedBlock {
    /// Weights are `constrained DOFs × dofs`; validated when the constraint is built.
    pub fn new(node: NodeId, dofs: Vec<usize>, weights: Array2<f64>) -> Self {
        Self {
            node,
            dofs,
            weights,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn dofs(&self) -> &[usize] {
        &self.dofs
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }
}

/// Expresses DOFs of one node as a weighted sum over several retained nodes:
/// `u(constrained) = Σ_k W_k · u(retained_k)`.
///
/// Typical use is embedding a node inside an element, with the weights taken
/// from the element's shape functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRetained {
    constrained: NodeId,
    constrained_dofs: Vec<usize>,
    blocks: Vec<RetainedBlock>,
}

impl MultiRetained {
    pub fn new<C: NodeCatalog + ?Sized>(
        catalog: &C,
        constrained: NodeId,
        constrained_dofs: Vec<usize>,
        blocks: Vec<RetainedBlock>,
    ) -> ModelResult<Self> {
        catalog.require_dofs(constrained, &constrained_dofs)?;
        for block in &blocks {
            catalog.require_dofs(block.node, &block.dofs)?;
        }

        let mr = Self {
            constrained,
            constrained_dofs,
            blocks,
        };
        mr.check_shape()?;
        Ok(mr)
    }

    /// Check that every weight block matches the DOF lists.
    pub fn check_shape(&self) -> ModelResult<()> {
        if self.constrained_dofs.is_empty() {
            return Err(ModelError::Empty("constrained DOFs"));
        }
        if self.blocks.is_empty() {
            return Err(ModelError::Empty("retained nodes"));
        }
        for block in &self.blocks {
            let expected = (self.constrained_dofs.len(), block.dofs.len());
            if block.weights.dim() != expected {
                return Err(ModelError::shape_mismatch(
                    "weight block",
                    expected,
                    block.weights.dim(),
                ));
            }
        }
        Ok(())
    }

    /// The constrained (owning) node.
    pub fn node(&self) -> NodeId {
        self.constrained
    }

    pub fn set_node<C: NodeCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        node: NodeId,
    ) -> ModelResult<()> {
        catalog.require_dofs(node, &self.constrained_dofs)?;
        self.constrained = node;
        Ok(())
    }

    pub fn constrained_dofs(&self) -> &[usize] {
        &self.constrained_dofs
    }

    pub fn dof_count(&self) -> usize {
        self.constrained_dofs.len()
    }

    /// Retained nodes in block order.
    pub fn retained_nodes(&self) -> Vec<NodeId> {
        self.blocks.iter().map(|b| b.node).collect()
    }

    pub fn blocks(&self) -> &[RetainedBlock] {
        &self.blocks
    }

    /// Update the weights of block `index`. The shape must not change.
    pub fn set_weights(&mut self, index: usize, weights: Array2<f64>) -> ModelResult<()> {
        let block = self.blocks.get_mut(index).ok_or_else(|| {
            ModelError::topology_changed(format!("no retained block at index {}", index))
        })?;
        if weights.dim() != block.weights.dim() {
            return Err(ModelError::topology_changed(format!(
                "weight block {} {:?} -> {:?}",
                index,
                block.weights.dim(),
                weights.dim()
            )));
        }
        block.weights = weights;
        Ok(())
    }

    /// `u(constrained, i) - Σ_k Σ_j W_k[i, j] u(retained_k, j) = 0`
    pub fn rows(&self) -> Vec<LinearRow> {
        self.constrained_dofs
            .iter()
            .enumerate()
            .map(|(i, &cd)| {
                let mut row =
                    LinearRow::new(0.0).with_term(DofRef::new(self.constrained, cd), 1.0);
                for block in &self.blocks {
                    for (j, &rd) in block.dofs.iter().enumerate() {
                        row = row.with_term(DofRef::new(block.node, rd), -block.weights[[i, j]]);
                    }
                }
                row
            })
            .collect()
    }
}
