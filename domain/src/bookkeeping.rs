//! What the domain has handed to the last analysis step.

use std::collections::BTreeSet;

use fixity_core::{ConstraintTag, HypothesisTag};
use fixity_hypothesis::{Hypothesis, HypothesisObserver};
use tracing::debug;

use crate::analysis::AnalysisSet;

/// Records the constraints and hypothesis imposed by the last analysis step,
/// and retracts them when they are removed from the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookkeeping {
    imposed_constraints: BTreeSet<ConstraintTag>,
    imposed_hypothesis: Option<HypothesisTag>,
    /// Names of detached hypotheses, in detach order.
    detached: Vec<String>,
}

impl Bookkeeping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the imposed state with `set`.
    pub fn record(&mut self, set: &AnalysisSet) {
        self.imposed_constraints = set.constraints.iter().copied().collect();
        self.imposed_hypothesis = set.hypothesis;
    }

    pub fn is_imposed(&self, tag: ConstraintTag) -> bool {
        self.imposed_constraints.contains(&tag)
    }

    pub fn imposed_constraints(&self) -> impl Iterator<Item = ConstraintTag> + '_ {
        self.imposed_constraints.iter().copied()
    }

    pub fn imposed_hypothesis(&self) -> Option<HypothesisTag> {
        self.imposed_hypothesis
    }

    /// Forget `tag`. Returns whether it was imposed.
    pub fn retract_constraint(&mut self, tag: ConstraintTag) -> bool {
        let retracted = self.imposed_constraints.remove(&tag);
        if retracted {
            debug!(%tag, "imposed constraint retracted");
        }
        retracted
    }

    pub fn detached(&self) -> &[String] {
        &self.detached
    }

    pub fn detach_count(&self) -> usize {
        self.detached.len()
    }
}

impl HypothesisObserver for Bookkeeping {
    fn hypothesis_detached(&mut self, name: &str, hypothesis: &Hypothesis) {
        let tag = hypothesis.tag();
        if self.imposed_hypothesis == Some(tag) {
            self.imposed_hypothesis = None;
        }
        self.detached.push(name.to_string());
        debug!(name, %tag, fixities = hypothesis.len(), "hypothesis detached");
    }
}
