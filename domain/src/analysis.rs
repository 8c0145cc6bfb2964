//! The constraint set an analysis step assembles.

use fixity_constraint::LinearRow;
use fixity_core::{ConstraintTag, HypothesisTag};

/// Constraints implied by the active load patterns and the current hypothesis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSet {
    /// Domain constraints taking part: active single-freedom, then all coupling constraints.
    pub constraints: Vec<ConstraintTag>,
    /// The current hypothesis, whose fixities are appended to `rows`.
    pub hypothesis: Option<HypothesisTag>,
    /// Rows for the reduced system, in the order above.
    pub rows: Vec<LinearRow>,
}

impl AnalysisSet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
