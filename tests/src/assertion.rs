//! Assertion builders for container contents.

use fixity_constraint::ConstraintContainer;

/// Expected collection sizes; unset fields are not checked.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Counts {
    pub single: Option<usize>,
    pub multi: Option<usize>,
    pub retained: Option<usize>,
    pub patterns: Option<usize>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(mut self, n: usize) -> Self {
        self.single = Some(n);
        self
    }

    pub fn multi(mut self, n: usize) -> Self {
        self.multi = Some(n);
        self
    }

    pub fn retained(mut self, n: usize) -> Self {
        self.retained = Some(n);
        self
    }

    pub fn patterns(mut self, n: usize) -> Self {
        self.patterns = Some(n);
        self
    }

    /// Compare against `container`, describing every mismatch.
    pub fn check(&self, container: &ConstraintContainer) -> Result<(), String> {
        let actual = [
            ("single-freedom", self.single, container.count_single_freedom()),
            ("multi-freedom", self.multi, container.count_multi_freedom()),
            ("multi-retained", self.retained, container.count_multi_retained()),
            ("active pattern", self.patterns, container.count_active_patterns()),
        ];

        let errors: Vec<String> = actual
            .iter()
            .filter_map(|&(what, expected, got)| match expected {
                Some(n) if n != got => Some(format!("expected {} {} count, got {}", n, what, got)),
                _ => None,
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }

    /// Panic with every mismatch if `container` does not match.
    pub fn assert(&self, container: &ConstraintContainer) {
        if let Err(message) = self.check(container) {
            panic!("{}", message);
        }
    }
}

/// Assert both containers hold the same constraints under the same tags.
pub fn assert_same_entries(left: &ConstraintContainer, right: &ConstraintContainer) {
    let left: Vec<_> = left.iter().map(|(tag, c)| (tag, c.to_constraint())).collect();
    let right: Vec<_> = right.iter().map(|(tag, c)| (tag, c.to_constraint())).collect();
    assert_eq!(left.len(), right.len(), "entry count differs");
    for ((lt, lc), (rt, rc)) in left.iter().zip(&right) {
        assert_eq!(lt, rt, "tag differs");
        assert_eq!(lc, rc, "constraint {} differs", lt);
    }
}
