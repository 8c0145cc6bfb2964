//! The constraint container.

use std::collections::{BTreeMap, BTreeSet};

use fixity_core::{can_issue_tag, ConstraintTag, ModelError, ModelResult, PatternTag};
use tracing::warn;

use crate::constraint::{Constraint, ConstraintKind, ConstraintRef};
use crate::multi::MultiFreedom;
use crate::retained::MultiRetained;
use crate::row::LinearRow;
use crate::single::SingleFreedom;

/// Owns the single-freedom, multi-freedom and multi-retained constraints of a
/// domain (or of one hypothesis) plus the set of active load patterns.
///
/// Tags come from one counter shared by all three collections and are never
/// reissued, even after removal. Each live tag is in exactly one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintContainer {
    /// Tag of the container itself.
    tag: u64,
    /// Next constraint tag to issue.
    next_tag: u64,
    single: BTreeMap<ConstraintTag, SingleFreedom>,
    multi: BTreeMap<ConstraintTag, MultiFreedom>,
    retained: BTreeMap<ConstraintTag, MultiRetained>,
    active_patterns: BTreeSet<PatternTag>,
}

impl ConstraintContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container with its own tag.
    pub fn with_tag(tag: u64) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    pub fn set_tag(&mut self, tag: u64) {
        self.tag = tag;
    }

    /// The tag the next `add` will issue.
    pub fn next_tag(&self) -> ConstraintTag {
        ConstraintTag::new(self.next_tag)
    }

    // ==================== Counts ====================

    pub fn count_single_freedom(&self) -> usize {
        self.single.len()
    }

    pub fn count_multi_freedom(&self) -> usize {
        self.multi.len()
    }

    pub fn count_multi_retained(&self) -> usize {
        self.retained.len()
    }

    /// Total number of live constraints.
    pub fn len(&self) -> usize {
        self.single.len() + self.multi.len() + self.retained.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ==================== Add / Remove ====================

    /// Insert a constraint, returning its newly issued tag.
    ///
    /// Fails with [`ModelError::TagsExhausted`] once the counter has issued its
    /// last tag; the constraint is not inserted in that case.
    pub fn add(&mut self, constraint: impl Into<Constraint>) -> ModelResult<ConstraintTag> {
        let tag = self.alloc_tag()?;
        self.insert(tag, constraint.into());
        Ok(tag)
    }

    /// Take a constraint out of the container. Logs a warning if the tag is not live.
    pub fn remove(&mut self, tag: ConstraintTag) -> Option<Constraint> {
        let removed = self
            .single
            .remove(&tag)
            .map(Constraint::Single)
            .or_else(|| self.multi.remove(&tag).map(Constraint::Multi))
            .or_else(|| self.retained.remove(&tag).map(Constraint::Retained));
        if removed.is_none() {
            warn!(%tag, "remove: no such constraint");
        }
        removed
    }

    /// Drop every constraint. The tag counter is kept, so no tag is reissued.
    pub fn clear(&mut self) -> usize {
        let count = self.len();
        self.single.clear();
        self.multi.clear();
        self.retained.clear();
        count
    }

    /// Re-insert a constraint under a tag issued elsewhere (used when
    /// reconstructing from a frame). Advances the counter past `tag`.
    ///
    /// A tag whose successor could not issue another tag is rejected with
    /// [`ModelError::TagOutOfRange`].
    pub fn restore(&mut self, tag: ConstraintTag, constraint: Constraint) -> ModelResult<()> {
        let next = match tag.raw().checked_add(1) {
            Some(next) if can_issue_tag(next) => next,
            _ => return Err(ModelError::TagOutOfRange(tag)),
        };
        if self.contains(tag) {
            return Err(ModelError::TagInUse(tag));
        }
        self.insert(tag, constraint);
        self.advance_tag_counter(next);
        Ok(())
    }

    /// Raise the counter to at least `next`; never lowers it.
    pub fn advance_tag_counter(&mut self, next: u64) {
        self.next_tag = self.next_tag.max(next);
    }

    fn alloc_tag(&mut self) -> ModelResult<ConstraintTag> {
        let tag = ConstraintTag::new(self.next_tag);
        self.next_tag = self
            .next_tag
            .checked_add(1)
            .ok_or(ModelError::TagsExhausted)?;
        Ok(tag)
    }

    fn insert(&mut self, tag: ConstraintTag, constraint: Constraint) {
        match constraint {
            Constraint::Single(c) => {
                self.single.insert(tag, c);
            }
            Constraint::Multi(c) => {
                self.multi.insert(tag, c);
            }
            Constraint::Retained(c) => {
                self.retained.insert(tag, c);
            }
        }
    }

    // ==================== Lookups ====================

    /// Find a constraint in any collection.
    pub fn get(&self, tag: ConstraintTag) -> Option<ConstraintRef<'_>> {
        self.single
            .get(&tag)
            .map(ConstraintRef::Single)
            .or_else(|| self.multi.get(&tag).map(ConstraintRef::Multi))
            .or_else(|| self.retained.get(&tag).map(ConstraintRef::Retained))
    }

    pub fn contains(&self, tag: ConstraintTag) -> bool {
        self.kind_of(tag).is_some()
    }

    /// Which collection holds `tag`, if any.
    pub fn kind_of(&self, tag: ConstraintTag) -> Option<ConstraintKind> {
        self.get(tag).map(|c| c.kind())
    }

    pub fn single(&self, tag: ConstraintTag) -> Option<&SingleFreedom> {
        self.single.get(&tag)
    }

    pub fn single_mut(&mut self, tag: ConstraintTag) -> Option<&mut SingleFreedom> {
        self.single.get_mut(&tag)
    }

    pub fn multi(&self, tag: ConstraintTag) -> Option<&MultiFreedom> {
        self.multi.get(&tag)
    }

    pub fn multi_mut(&mut self, tag: ConstraintTag) -> Option<&mut MultiFreedom> {
        self.multi.get_mut(&tag)
    }

    pub fn retained(&self, tag: ConstraintTag) -> Option<&MultiRetained> {
        self.retained.get(&tag)
    }

    pub fn retained_mut(&mut self, tag: ConstraintTag) -> Option<&mut MultiRetained> {
        self.retained.get_mut(&tag)
    }

    // ==================== Iteration ====================

    pub fn iter_single(&self) -> impl Iterator<Item = (ConstraintTag, &SingleFreedom)> {
        self.single.iter().map(|(t, c)| (*t, c))
    }

    pub fn iter_multi(&self) -> impl Iterator<Item = (ConstraintTag, &MultiFreedom)> {
        self.multi.iter().map(|(t, c)| (*t, c))
    }

    pub fn iter_retained(&self) -> impl Iterator<Item = (ConstraintTag, &MultiRetained)> {
        self.retained.iter().map(|(t, c)| (*t, c))
    }

    /// All constraints: single-freedom, then multi-freedom, then multi-retained,
    /// each in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstraintTag, ConstraintRef<'_>)> {
        self.iter_single()
            .map(|(t, c)| (t, ConstraintRef::Single(c)))
            .chain(self.iter_multi().map(|(t, c)| (t, ConstraintRef::Multi(c))))
            .chain(
                self.iter_retained()
                    .map(|(t, c)| (t, ConstraintRef::Retained(c))),
            )
    }

    /// Live tags in iteration order.
    pub fn tags(&self) -> Vec<ConstraintTag> {
        self.iter().map(|(t, _)| t).collect()
    }

    // ==================== Load Patterns ====================

    pub fn count_active_patterns(&self) -> usize {
        self.active_patterns.len()
    }

    /// Mark a load pattern active. Returns false if it already was.
    pub fn activate_pattern(&mut self, pattern: PatternTag) -> bool {
        self.active_patterns.insert(pattern)
    }

    /// Mark a load pattern inactive. Returns false if it was not active.
    pub fn deactivate_pattern(&mut self, pattern: PatternTag) -> bool {
        self.active_patterns.remove(&pattern)
    }

    pub fn is_pattern_active(&self, pattern: PatternTag) -> bool {
        self.active_patterns.contains(&pattern)
    }

    pub fn active_patterns(&self) -> impl Iterator<Item = PatternTag> + '_ {
        self.active_patterns.iter().copied()
    }

    pub(crate) fn set_active_patterns(&mut self, patterns: impl IntoIterator<Item = PatternTag>) {
        self.active_patterns = patterns.into_iter().collect();
    }

    /// Single-freedom constraints whose load pattern is active.
    pub fn active_single_freedom(&self) -> impl Iterator<Item = (ConstraintTag, &SingleFreedom)> {
        self.iter_single()
            .filter(move |(_, c)| self.active_patterns.contains(&c.pattern()))
    }

    /// Rows of every constraint that applies under the active load patterns:
    /// active single-freedom constraints and all coupling constraints.
    pub fn active_rows(&self) -> Vec<LinearRow> {
        let singles = self.active_single_freedom().flat_map(|(_, c)| c.rows());
        let multis = self.iter_multi().flat_map(|(_, c)| c.rows());
        let retained = self.iter_retained().flat_map(|(_, c)| c.rows());
        singles.chain(multis).chain(retained).collect()
    }
}
