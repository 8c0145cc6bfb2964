//! The hypothesis registry.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use fixity_core::HypothesisTag;
use tracing::{debug, error, info};

use crate::hypothesis::Hypothesis;
use crate::observer::HypothesisObserver;

/// A name-keyed catalogue of hypotheses with at most one current selection.
///
/// Names are kept in a `BTreeMap`, so iteration (and therefore the order of
/// entries on the wire) is lexicographic on every process. The current
/// selection is stored as a name and re-resolved on every access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HypothesisRegistry {
    /// Tag of the registry itself.
    tag: u64,
    /// Next hypothesis tag to issue.
    next_tag: u64,
    hypotheses: BTreeMap<String, Hypothesis>,
    current: Option<String>,
}

impl HypothesisRegistry {
    pub fn new() -> Self {
        Self::default()
    }

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

    /// The tag the next `create` will issue.
    pub fn next_tag(&self) -> HypothesisTag {
        HypothesisTag::new(self.next_tag)
    }

    pub(crate) fn advance_tag_counter(&mut self, next: u64) {
        self.next_tag = self.next_tag.max(next);
    }

    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    // ==================== Creation ====================

    /// Create a hypothesis named `name`, or return the existing one.
    ///
    /// An empty name is rejected with `None`, as is a new name once the tag
    /// counter is exhausted. A name already in use returns the existing entry
    /// untouched; no tag is consumed in that case.
    pub fn create(&mut self, name: &str) -> Option<&mut Hypothesis> {
        if name.is_empty() {
            error!("cannot create a hypothesis with an empty name");
            return None;
        }

        match self.hypotheses.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                info!(name, "hypothesis already exists");
                Some(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let Some(next) = self.next_tag.checked_add(1) else {
                    error!(name, "cannot create hypothesis: tag counter exhausted");
                    return None;
                };
                let tag = HypothesisTag::new(self.next_tag);
                self.next_tag = next;
                debug!(name, %tag, "hypothesis created");
                Some(entry.insert(Hypothesis::new(tag)))
            }
        }
    }

    // ==================== Lookups ====================

    pub fn find_by_name(&self, name: &str) -> Option<&Hypothesis> {
        self.hypotheses.get(name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Hypothesis> {
        self.hypotheses.get_mut(name)
    }

    /// Linear scan; tags are not indexed.
    pub fn find_by_tag(&self, tag: HypothesisTag) -> Option<(&str, &Hypothesis)> {
        self.hypotheses
            .iter()
            .find(|(_, h)| h.tag() == tag)
            .map(|(name, h)| (name.as_str(), h))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hypotheses.contains_key(name)
    }

    /// Hypotheses in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Hypothesis)> {
        self.hypotheses.iter().map(|(name, h)| (name.as_str(), h))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hypotheses.keys().map(String::as_str)
    }

    // ==================== Removal ====================

    /// Remove `name`, notifying `observer` before the hypothesis is dropped.
    ///
    /// If it was the current selection, the selection is cleared. Returns
    /// false (and logs) if no such hypothesis exists.
    pub fn remove<O>(&mut self, name: &str, observer: &mut O) -> bool
    where
        O: HypothesisObserver + ?Sized,
    {
        let Some(hypothesis) = self.hypotheses.get(name) else {
            error!(name, "cannot remove unknown hypothesis");
            return false;
        };

        observer.hypothesis_detached(name, hypothesis);
        self.hypotheses.remove(name);

        if self.current.as_deref() == Some(name) {
            debug!(name, "current hypothesis removed, selection cleared");
            self.current = None;
        }
        true
    }

    /// Remove every hypothesis, one `remove` at a time. Returns how many were removed.
    pub fn remove_all<O>(&mut self, observer: &mut O) -> usize
    where
        O: HypothesisObserver + ?Sized,
    {
        let names: Vec<String> = self.hypotheses.keys().cloned().collect();
        let mut removed = 0;
        for name in names {
            if self.remove(&name, &mut *observer) {
                removed += 1;
            }
        }
        removed
    }

    // ==================== Current Selection ====================

    /// Select `name` as current. Unknown names are rejected and the selection is kept.
    pub fn set_current(&mut self, name: &str) -> bool {
        if !self.hypotheses.contains_key(name) {
            error!(name, "cannot select unknown hypothesis");
            return false;
        }
        self.current = Some(name.to_string());
        true
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// The current hypothesis, resolved by name.
    pub fn current(&self) -> Option<&Hypothesis> {
        self.current
            .as_deref()
            .and_then(|name| self.hypotheses.get(name))
    }

    pub fn current_mut(&mut self) -> Option<&mut Hypothesis> {
        let name = self.current.as_deref()?;
        self.hypotheses.get_mut(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
