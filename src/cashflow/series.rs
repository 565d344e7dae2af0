//! Periodic cashflow sequence

use crate::valuation::config::{DEFAULT_TOLERANCE, TOLERANCE_DIVISOR};

/// An ordered, immutable sequence of periodic cashflows
///
/// Index 0 is the base investment (any sign), indices 1..n are the
/// flows of the following periods.
#[derive(Debug, Clone, PartialEq)]
pub struct CashflowSeries {
    values: Vec<f64>,
}

impl CashflowSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_positive(&self) -> bool {
        self.values.iter().any(|&cf| cf > 0.0)
    }

    pub fn has_negative(&self) -> bool {
        self.values.iter().any(|&cf| cf < 0.0)
    }

    /// True when at least one strictly positive and one strictly negative
    /// flow exist, the precondition for an IRR to be defined.
    pub fn has_sign_change(&self) -> bool {
        self.has_positive() && self.has_negative()
    }

    /// Mean of the absolute cashflow values
    pub fn mean_absolute(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let total: f64 = self.values.iter().map(|cf| cf.abs()).sum();
        total / self.values.len() as f64
    }

    /// NPV tolerance scaled to the magnitude of the flows
    ///
    /// Inputs in the tens give 1e-5, thousands give 1e-3,
    /// hundreds of thousands give 1.0.
    pub fn tolerance(&self) -> f64 {
        if self.values.is_empty() {
            return DEFAULT_TOLERANCE;
        }
        self.mean_absolute() / TOLERANCE_DIVISOR
    }
}

impl From<Vec<f64>> for CashflowSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for CashflowSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
