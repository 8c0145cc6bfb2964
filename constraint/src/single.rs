//! Single-freedom constraints.

use fixity_core::{DofRef, ModelResult, NodeCatalog, NodeId, PatternTag};
use serde::{Deserialize, Serialize};

use crate::row::LinearRow;

/// Prescribes the value of one DOF under one load pattern.
///
/// A zero value is a support fixity (homogeneous); a non-zero value is an
/// imposed motion scaled by the load pattern's time history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleFreedom {
    dof: DofRef,
    value: f64,
    pattern: PatternTag,
}

impl SingleFreedom {
    /// Create a constraint prescribing `value` on `dof`.
    pub fn new<C: NodeCatalog + ?Sized>(
        catalog: &C,
        dof: DofRef,
        value: f64,
        pattern: PatternTag,
    ) -> ModelResult<Self> {
        catalog.require_dof(dof)?;
        Ok(Self {
            dof,
            value,
            pattern,
        })
    }

    /// Create a homogeneous support fixity on `dof`.
    pub fn fixed<C: NodeCatalog + ?Sized>(
        catalog: &C,
        dof: DofRef,
        pattern: PatternTag,
    ) -> ModelResult<Self> {
        Self::new(catalog, dof, 0.0, pattern)
    }

    /// The constrained node.
    pub fn node(&self) -> NodeId {
        self.dof.node
    }

    /// Move the constraint to another node; the DOF index is kept and must exist there.
    pub fn set_node<C: NodeCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        node: NodeId,
    ) -> ModelResult<()> {
        let dof = DofRef::new(node, self.dof.dof);
        catalog.require_dof(dof)?;
        self.dof = dof;
        Ok(())
    }

    pub fn dof(&self) -> DofRef {
        self.dof
    }

    /// Local DOF index, fixed at construction.
    pub fn dof_index(&self) -> usize {
        self.dof.dof
    }

    pub fn dof_count(&self) -> usize {
        1
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub fn pattern(&self) -> PatternTag {
        self.pattern
    }

    pub fn set_pattern(&mut self, pattern: PatternTag) {
        self.pattern = pattern;
    }

    /// True for pure support fixity (zero prescribed value).
    pub fn is_homogeneous(&self) -> bool {
        self.value == 0.0
    }

    /// `dof = value`
    pub fn rows(&self) -> Vec<LinearRow> {
        vec![LinearRow::new(self.value).with_term(self.dof, 1.0)]
    }
}
