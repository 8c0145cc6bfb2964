//! Fixity Hypothesis
//!
//! Named, swappable sets of support fixities ("lockers").
//!
//! Responsibilities:
//! - Create hypotheses by unique, non-empty name with their own tag counter
//! - Look hypotheses up by name or by tag
//! - Notify an observer before a hypothesis is dropped
//! - Keep the current selection as a name that never dangles
//! - Move registry state through the exchange protocol

mod exchange;
mod hypothesis;
mod observer;
mod registry;

pub use hypothesis::Hypothesis;
pub use observer::HypothesisObserver;
pub use registry::HypothesisRegistry;
