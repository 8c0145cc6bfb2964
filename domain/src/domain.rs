//! The domain.

use fixity_constraint::{Constraint, ConstraintContainer, MultiFreedom, SingleFreedom};
use fixity_core::{ConstraintTag, DofRef, HypothesisTag, NodeId, NodeTable, PatternTag};
use fixity_hypothesis::{Hypothesis, HypothesisRegistry};
use tracing::debug;

use crate::analysis::AnalysisSet;
use crate::bookkeeping::Bookkeeping;
use crate::error::{DomainError, DomainResult};

/// Owns the nodes, one constraint container and one hypothesis registry.
#[derive(Debug, Clone, Default)]
pub struct Domain {
    tag: u64,
    pub(crate) nodes: NodeTable,
    pub(crate) constraints: ConstraintContainer,
    pub(crate) hypotheses: HypothesisRegistry,
    pub(crate) bookkeeping: Bookkeeping,
}

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a domain whose container and registry carry `tag`.
    pub fn with_tag(tag: u64) -> Self {
        Self {
            tag,
            constraints: ConstraintContainer::with_tag(tag),
            hypotheses: HypothesisRegistry::with_tag(tag),
            ..Self::default()
        }
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    // ==================== Accessors ====================

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn constraints(&self) -> &ConstraintContainer {
        &self.constraints
    }

    /// Mutable access for coefficient updates and pattern activation.
    /// Use [`Domain::remove_constraint`] to remove, so bookkeeping is retracted.
    pub fn constraints_mut(&mut self) -> &mut ConstraintContainer {
        &mut self.constraints
    }

    pub fn hypotheses(&self) -> &HypothesisRegistry {
        &self.hypotheses
    }

    pub fn hypothesis_mut(&mut self, name: &str) -> Option<&mut Hypothesis> {
        self.hypotheses.find_by_name_mut(name)
    }

    pub fn bookkeeping(&self) -> &Bookkeeping {
        &self.bookkeeping
    }

    // ==================== Nodes ====================

    pub fn add_node(&mut self, node: NodeId, ndof: usize) {
        self.nodes.insert(node, ndof);
    }

    // ==================== Constraints ====================

    /// Prescribe `value` on `dof` under `pattern`.
    pub fn add_single_freedom(
        &mut self,
        dof: DofRef,
        value: f64,
        pattern: PatternTag,
    ) -> DomainResult<ConstraintTag> {
        let sp = SingleFreedom::new(&self.nodes, dof, value, pattern)?;
        Ok(self.constraints.add(sp)?)
    }

    /// Tie `dofs` of `constrained` to the same DOFs of `retained`.
    pub fn add_equal_dof(
        &mut self,
        constrained: NodeId,
        retained: NodeId,
        dofs: &[usize],
    ) -> DomainResult<ConstraintTag> {
        let mf = MultiFreedom::equal_dof(&self.nodes, constrained, retained, dofs)?;
        Ok(self.constraints.add(mf)?)
    }

    /// Add an already validated constraint.
    pub fn add_constraint(
        &mut self,
        constraint: impl Into<Constraint>,
    ) -> DomainResult<ConstraintTag> {
        Ok(self.constraints.add(constraint)?)
    }

    /// Retract `tag` from the bookkeeping, then remove it from the container.
    pub fn remove_constraint(&mut self, tag: ConstraintTag) -> Option<Constraint> {
        self.bookkeeping.retract_constraint(tag);
        self.constraints.remove(tag)
    }

    pub fn activate_pattern(&mut self, pattern: PatternTag) -> bool {
        self.constraints.activate_pattern(pattern)
    }

    pub fn deactivate_pattern(&mut self, pattern: PatternTag) -> bool {
        self.constraints.deactivate_pattern(pattern)
    }

    // ==================== Hypotheses ====================

    pub fn create_hypothesis(&mut self, name: &str) -> Option<HypothesisTag> {
        self.hypotheses.create(name).map(|h| h.tag())
    }

    /// Add a fixity to the hypothesis `name`.
    pub fn add_hypothesis_fixity(
        &mut self,
        name: &str,
        dof: DofRef,
        value: f64,
        pattern: PatternTag,
    ) -> DomainResult<ConstraintTag> {
        let sp = SingleFreedom::new(&self.nodes, dof, value, pattern)?;
        let hypothesis = self
            .hypotheses
            .find_by_name_mut(name)
            .ok_or_else(|| DomainError::unknown_hypothesis(name))?;
        Ok(hypothesis.add(sp)?)
    }

    pub fn set_current_hypothesis(&mut self, name: &str) -> bool {
        self.hypotheses.set_current(name)
    }

    pub fn current_hypothesis(&self) -> Option<&Hypothesis> {
        self.hypotheses.current()
    }

    /// Detach `name` from the bookkeeping, then drop it.
    pub fn remove_hypothesis(&mut self, name: &str) -> bool {
        self.hypotheses.remove(name, &mut self.bookkeeping)
    }

    pub fn remove_all_hypotheses(&mut self) -> usize {
        self.hypotheses.remove_all(&mut self.bookkeeping)
    }

    // ==================== Analysis ====================

    /// Constraints an analysis step would assemble now.
    pub fn analysis_set(&self) -> AnalysisSet {
        let container = &self.constraints;
        let constraints = container
            .active_single_freedom()
            .map(|(tag, _)| tag)
            .chain(container.iter_multi().map(|(tag, _)| tag))
            .chain(container.iter_retained().map(|(tag, _)| tag))
            .collect();

        let mut rows = container.active_rows();
        let hypothesis = self.hypotheses.current().map(|h| {
            rows.extend(h.rows());
            h.tag()
        });

        AnalysisSet {
            constraints,
            hypothesis,
            rows,
        }
    }

    /// Compute the analysis set and record it as imposed.
    pub fn impose(&mut self) -> AnalysisSet {
        let set = self.analysis_set();
        self.bookkeeping.record(&set);
        debug!(
            constraints = set.constraints.len(),
            hypothesis = ?set.hypothesis,
            rows = set.row_count(),
            "constraints imposed"
        );
        set
    }
}
