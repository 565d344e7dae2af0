//! Solver configuration
//!
//! Timing offset and tolerance are fixed once per computation and passed
//! explicitly into the evaluator and solver.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cashflow::CashflowSeries;
use crate::error::IrrError;

/// Lower bound of the initial search interval (-100%)
pub const LOW_RATE: f64 = -1.0;

/// Upper bound of the initial search interval (+100%)
pub const HIGH_RATE: f64 = 1.0;

/// Maximum number of bisection steps
pub const MAX_ITERATIONS: u32 = 1000;

/// Divisor applied to the mean absolute cashflow to obtain the NPV tolerance
pub const TOLERANCE_DIVISOR: f64 = 1e5;

/// Tolerance used when no cashflows are available to derive one from
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// When the cashflows of periods 1..n are realized within their period
///
/// The offset is added to the discount exponent of every period after
/// the base investment: period `i` is discounted by `(1 + r)^(i - 1 + offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingOffset {
    /// Realized at period start (offset 0)
    Advance,
    /// Realized continuously, discounted at mid-period (offset 0.5)
    #[default]
    MidPeriod,
    /// Realized at period end (offset 1)
    Arrears,
}

impl TimingOffset {
    pub fn as_f64(self) -> f64 {
        match self {
            TimingOffset::Advance => 0.0,
            TimingOffset::MidPeriod => 0.5,
            TimingOffset::Arrears => 1.0,
        }
    }

    /// Map the suffix of a `-d` command line flag.
    ///
    /// Only `0` and `1` select an offset; anything else leaves the
    /// default in place.
    pub fn from_flag(suffix: &str) -> Option<Self> {
        match suffix {
            "0" => Some(TimingOffset::Advance),
            "1" => Some(TimingOffset::Arrears),
            _ => None,
        }
    }
}

impl FromStr for TimingOffset {
    type Err = IrrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "advance" => Ok(TimingOffset::Advance),
            "0.5" | ".5" | "mid" => Ok(TimingOffset::MidPeriod),
            "1" | "arrears" => Ok(TimingOffset::Arrears),
            _ => Err(IrrError::InvalidTimingOffset {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimingOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

/// Immutable parameters of a single IRR computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Discount exponent offset for periods 1..n
    pub timing_offset: TimingOffset,

    /// Absolute NPV residual accepted as zero
    pub tolerance: f64,

    /// Bisection step cap
    pub max_iterations: u32,
}

impl SolverConfig {
    pub fn new(timing_offset: TimingOffset, tolerance: f64) -> Self {
        Self {
            timing_offset,
            tolerance,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Build the configuration for one cashflow series, deriving the
    /// tolerance from the series' magnitude.
    pub fn for_series(series: &CashflowSeries, timing_offset: TimingOffset) -> Self {
        Self::new(timing_offset, series.tolerance())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(TimingOffset::default(), DEFAULT_TOLERANCE)
    }
}
