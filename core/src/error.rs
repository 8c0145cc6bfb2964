//! Common error types for the constraint model.

use crate::{ConstraintTag, DofRef, NodeId};
use thiserror::Error;

/// Errors raised when a constraint is built or updated with invalid data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Node not known to the node catalog.
    #[error("Node not found: {0}")]
    UnknownNode(NodeId),

    /// DOF index beyond the node's number of degrees of freedom.
    #[error("DOF index out of range: {dof} (node has {ndof} DOFs)")]
    DofOutOfRange { dof: DofRef, ndof: usize },

    /// Matrix or vector dimensions disagree with the constrained/retained DOF lists.
    #[error("Shape mismatch in {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A constraint couples no DOFs at all.
    #[error("Constraint has no {0}")]
    Empty(&'static str),

    /// A coefficient update tried to change which nodes or DOFs are coupled.
    #[error("Topology is fixed after construction: {0}")]
    TopologyChanged(String),

    /// A constraint was restored under a tag that is already live.
    #[error("Constraint tag already in use: {0}")]
    TagInUse(ConstraintTag),

    /// A restored tag would leave the counter unable to issue another tag.
    #[error("Constraint tag out of range: {0}")]
    TagOutOfRange(ConstraintTag),

    /// The tag counter has issued its last tag.
    #[error("Tag counter exhausted")]
    TagsExhausted,
}

impl ModelError {
    pub fn dof_out_of_range(dof: DofRef, ndof: usize) -> Self {
        Self::DofOutOfRange { dof, ndof }
    }

    pub fn shape_mismatch(
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }

    pub fn topology_changed(message: impl Into<String>) -> Self {
        Self::TopologyChanged(message.into())
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
