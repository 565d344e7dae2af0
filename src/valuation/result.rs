//! Structured IRR outcome

use std::fmt;

use serde::Serialize;

/// How an IRR computation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrStatus {
    /// The NPV at `rate` is within tolerance of zero
    Converged,
    /// The cashflows lack a positive or a negative value; the rate is 0.0
    NoSignChange,
    /// The step cap was hit; the rate is the last midpoint tried
    IterationCapReached,
    /// The step cap was hit while the last evaluation produced a NaN
    /// discount factor
    NumericallyUnstable,
}

impl fmt::Display for IrrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IrrStatus::Converged => "converged",
            IrrStatus::NoSignChange => "no sign change",
            IrrStatus::IterationCapReached => "iteration cap reached",
            IrrStatus::NumericallyUnstable => "numerically unstable",
        };
        f.write_str(label)
    }
}

/// Result of an IRR computation
///
/// `rate` is always a number, whatever the status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrResult {
    /// Periodic internal rate of return (0.1 = 10%)
    pub rate: f64,
    pub status: IrrStatus,
    /// Bisection steps taken
    pub iterations: u32,
    /// NPV at `rate` (0.0 when the IRR is undefined)
    pub npv: f64,
}

impl IrrResult {
    /// Result for cashflows without both inflows and outflows
    pub fn undefined() -> Self {
        Self {
            rate: 0.0,
            status: IrrStatus::NoSignChange,
            iterations: 0,
            npv: 0.0,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.status == IrrStatus::Converged
    }
}
