//! A single hypothesis.

use fixity_constraint::{Constraint, ConstraintContainer, LinearRow, SingleFreedom};
use fixity_core::{ConstraintTag, HypothesisTag, ModelResult};

/// One alternative global fixity state: a tagged set of single-freedom constraints.
///
/// Only single-freedom constraints can be added, so the inner container never
/// holds coupling constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    tag: HypothesisTag,
    constraints: ConstraintContainer,
}

impl Hypothesis {
    pub(crate) fn new(tag: HypothesisTag) -> Self {
        Self {
            tag,
            constraints: ConstraintContainer::with_tag(tag.raw()),
        }
    }

    pub fn tag(&self) -> HypothesisTag {
        self.tag
    }

    /// Read access to the fixities as a container.
    pub fn constraints(&self) -> &ConstraintContainer {
        &self.constraints
    }

    pub(crate) fn constraints_mut(&mut self) -> &mut ConstraintContainer {
        &mut self.constraints
    }

    /// Add a fixity, returning the tag issued by this hypothesis.
    pub fn add(&mut self, fixity: SingleFreedom) -> ModelResult<ConstraintTag> {
        self.constraints.add(fixity)
    }

    pub fn remove(&mut self, tag: ConstraintTag) -> Option<SingleFreedom> {
        match self.constraints.remove(tag) {
            Some(Constraint::Single(c)) => Some(c),
            _ => None,
        }
    }

    pub fn get(&self, tag: ConstraintTag) -> Option<&SingleFreedom> {
        self.constraints.single(tag)
    }

    pub fn get_mut(&mut self, tag: ConstraintTag) -> Option<&mut SingleFreedom> {
        self.constraints.single_mut(tag)
    }

    pub fn count_single_freedom(&self) -> usize {
        self.constraints.count_single_freedom()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintTag, &SingleFreedom)> {
        self.constraints.iter_single()
    }

    /// Drop every fixity; tags are not reissued.
    pub fn clear(&mut self) -> usize {
        self.constraints.clear()
    }

    /// Rows of every fixity in this hypothesis, regardless of load pattern.
    pub fn rows(&self) -> Vec<LinearRow> {
        self.iter().flat_map(|(_, c)| c.rows()).collect()
    }
}
