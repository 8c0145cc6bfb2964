//! Multi-freedom constraints: `u(constrained) = C · u(retained) + c`.

use fixity_core::{DofRef, ModelError, ModelResult, NodeCatalog, NodeId};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::row::LinearRow;

/// Couples selected DOFs of one node to selected DOFs of another node.
///
/// Row `i` of the matrix belongs to `constrained_dofs[i]`, column `j` to
/// `retained_dofs[j]`. Node identities and DOF lists are fixed once built;
/// only the coefficients may be updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiFreedom {
    constrained: NodeId,
    constrained_dofs: Vec<usize>,
    retained: NodeId,
    retained_dofs: Vec<usize>,
    matrix: Array2<f64>,
    constant: Array1<f64>,
}

impl MultiFreedom {
    /// Create a constraint with a zero constant vector.
    pub fn new<C: NodeCatalog + ?Sized>(
        catalog: &C,
        constrained: NodeId,
        constrained_dofs: Vec<usize>,
        retained: NodeId,
        retained_dofs: Vec<usize>,
        matrix: Array2<f64>,
    ) -> ModelResult<Self> {
        catalog.require_dofs(constrained, &constrained_dofs)?;
        catalog.require_dofs(retained, &retained_dofs)?;

        let constant = Array1::zeros(constrained_dofs.len());
        let mf = Self {
            constrained,
            constrained_dofs,
            retained,
            retained_dofs,
            matrix,
            constant,
        };
        mf.check_shape()?;
        Ok(mf)
    }

    /// Equal-DOF coupling: each listed DOF of `constrained` follows the same DOF of `retained`.
    pub fn equal_dof<C: NodeCatalog + ?Sized>(
        catalog: &C,
        constrained: NodeId,
        retained: NodeId,
        dofs: &[usize],
    ) -> ModelResult<Self> {
        Self::new(
            catalog,
            constrained,
            dofs.to_vec(),
            retained,
            dofs.to_vec(),
            Array2::eye(dofs.len()),
        )
    }

    /// Replace the constant vector.
    pub fn with_constant(mut self, constant: Array1<f64>) -> ModelResult<Self> {
        self.set_constant(constant)?;
        Ok(self)
    }

    /// Check that the coefficient data matches the DOF lists.
    pub fn check_shape(&self) -> ModelResult<()> {
        if self.constrained_dofs.is_empty() {
            return Err(ModelError::Empty("constrained DOFs"));
        }
        if self.retained_dofs.is_empty() {
            return Err(ModelError::Empty("retained DOFs"));
        }
        let expected = (self.constrained_dofs.len(), self.retained_dofs.len());
        if self.matrix.dim() != expected {
            return Err(ModelError::shape_mismatch(
                "constraint matrix",
                expected,
                self.matrix.dim(),
            ));
        }
        if self.constant.len() != expected.0 {
            return Err(ModelError::shape_mismatch(
                "constant vector",
                (expected.0, 1),
                (self.constant.len(), 1),
            ));
        }
        Ok(())
    }

    /// The constrained (owning) node.
    pub fn node(&self) -> NodeId {
        self.constrained
    }

    /// Move the constrained end to another node that carries the same DOFs.
    pub fn set_node<C: NodeCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        node: NodeId,
    ) -> ModelResult<()> {
        catalog.require_dofs(node, &self.constrained_dofs)?;
        self.constrained = node;
        Ok(())
    }

    pub fn retained_node(&self) -> NodeId {
        self.retained
    }

    pub fn retained_nodes(&self) -> Vec<NodeId> {
        vec![self.retained]
    }

    pub fn constrained_dofs(&self) -> &[usize] {
        &self.constrained_dofs
    }

    pub fn retained_dofs(&self) -> &[usize] {
        &self.retained_dofs
    }

    /// Number of constrained DOFs.
    pub fn dof_count(&self) -> usize {
        self.constrained_dofs.len()
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn constant(&self) -> &Array1<f64> {
        &self.constant
    }

    /// Update the coefficients. The shape must not change.
    pub fn set_matrix(&mut self, matrix: Array2<f64>) -> ModelResult<()> {
        if matrix.dim() != self.matrix.dim() {
            return Err(ModelError::topology_changed(format!(
                "constraint matrix {:?} -> {:?}",
                self.matrix.dim(),
                matrix.dim()
            )));
        }
        self.matrix = matrix;
        Ok(())
    }

    /// Update the constant vector. The length must not change.
    pub fn set_constant(&mut self, constant: Array1<f64>) -> ModelResult<()> {
        if constant.len() != self.constrained_dofs.len() {
            return Err(ModelError::topology_changed(format!(
                "constant vector of length {} for {} constrained DOFs",
                constant.len(),
                self.constrained_dofs.len()
            )));
        }
        self.constant = constant;
        Ok(())
    }

    /// `u(constrained, i) - Σ_j C[i, j] u(retained, j) = c[i]`
    pub fn rows(&self) -> Vec<LinearRow> {
        self.constrained_dofs
            .iter()
            .enumerate()
            .map(|(i, &cd)| {
                let row = LinearRow::new(self.constant[i])
                    .with_term(DofRef::new(self.constrained, cd), 1.0);
                self.retained_dofs
                    .iter()
                    .enumerate()
                    .fold(row, |row, (j, &rd)| {
                        row.with_term(DofRef::new(self.retained, rd), -self.matrix[[i, j]])
                    })
            })
            .collect()
    }
}
