//! Detach notification.

use crate::hypothesis::Hypothesis;

/// Receives a notification before a hypothesis is dropped from the registry.
///
/// The hypothesis is still fully readable during the call, so domain-level
/// bookkeeping that refers to its constraints can be retracted first.
pub trait HypothesisObserver {
    fn hypothesis_detached(&mut self, name: &str, hypothesis: &Hypothesis);
}

impl<F> HypothesisObserver for F
where
    F: FnMut(&str, &Hypothesis),
{
    fn hypothesis_detached(&mut self, name: &str, hypothesis: &Hypothesis) {
        self(name, hypothesis)
    }
}
