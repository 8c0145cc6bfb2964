//! Linear constraint rows.

use fixity_core::DofRef;

/// One linear equation `Σ coefficient · dof = rhs` contributed by a constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRow {
    /// Non-zero terms, constrained DOF first.
    pub terms: Vec<(DofRef, f64)>,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearRow {
    /// Create a row with no terms.
    pub fn new(rhs: f64) -> Self {
        Self {
            terms: Vec::new(),
            rhs,
        }
    }

    /// Add a term, skipping exact zeros.
    pub fn with_term(mut self, dof: DofRef, coefficient: f64) -> Self {
        if coefficient != 0.0 {
            self.terms.push((dof, coefficient));
        }
        self
    }

    /// Total coefficient of `dof` in this row.
    pub fn coefficient(&self, dof: DofRef) -> f64 {
        self.terms
            .iter()
            .filter(|(d, _)| *d == dof)
            .map(|(_, c)| c)
            .sum()
    }

    /// Evaluate the residual `Σ c·u - rhs` for a displacement lookup.
    pub fn residual(&self, displacement: impl Fn(DofRef) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|(d, c)| c * displacement(*d))
            .sum::<f64>()
            - self.rhs
    }
}
