//! Discounted cashflow valuation and IRR solving
//!
//! The evaluator and solver are pure functions of their inputs; all
//! parameters travel in an explicit [`SolverConfig`].

pub mod config;
pub mod dcf;
mod irr;
mod result;

pub use config::{SolverConfig, TimingOffset, MAX_ITERATIONS};
pub use dcf::{discount_factor, evaluate_npv};
pub use irr::{calculate_irr, solve_irr};
pub use result::{IrrResult, IrrStatus};
