//! IRR Calculator - internal rate of return for periodic cashflows
//!
//! This library provides:
//! - Discounted cashflow (NPV) evaluation with start, mid or end of period timing
//! - A bounded bisection IRR solver with adaptive interval expansion
//! - Structured results distinguishing convergence from fallback values
//! - Permissive cashflow parsing from arguments and CSV files

pub mod cashflow;
pub mod error;
pub mod valuation;

// Re-export commonly used types
pub use cashflow::CashflowSeries;
pub use error::IrrError;
pub use valuation::{
    calculate_irr, evaluate_npv, solve_irr, IrrResult, IrrStatus, SolverConfig, TimingOffset,
};
