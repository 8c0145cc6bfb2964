//! Identity types for the constraint subsystem.
//!
//! All identifiers are 64-bit values that are:
//! - Process-local and assigned by their owner
//! - Immutable once assigned
//! - Serializable, so they can stand in for references across process boundaries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a mesh node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Counter value at which a tag counter is exhausted and can issue no more tags.
pub const TAG_COUNTER_LIMIT: u64 = u64::MAX;

/// Whether a counter holding `next` can still issue a tag.
pub fn can_issue_tag(next: u64) -> bool {
    next < TAG_COUNTER_LIMIT
}

/// Tag of a constraint, issued by its owning container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintTag(pub u64);

impl ConstraintTag {
    pub fn new(tag: u64) -> Self {
        Self(tag)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConstraintTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Tag of a hypothesis, issued by the registry's own counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HypothesisTag(pub u64);

impl HypothesisTag {
    pub fn new(tag: u64) -> Self {
        Self(tag)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HypothesisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Tag of an externally owned load pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternTag(pub u64);

impl PatternTag {
    pub fn new(tag: u64) -> Self {
        Self(tag)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PatternTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lp{}", self.0)
    }
}

/// Transport-assigned identifier of an exchanged frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl FrameId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// A single scalar unknown: one local component of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DofRef {
    /// The node carrying the degree of freedom.
    pub node: NodeId,
    /// Local component index within the node.
    pub dof: usize,
}

impl DofRef {
    /// Create a new DOF reference.
    pub fn new(node: NodeId, dof: usize) -> Self {
        Self { node, dof }
    }
}

impl fmt::Display for DofRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.node, self.dof)
    }
}
