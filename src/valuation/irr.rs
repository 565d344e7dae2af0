//! Internal Rate of Return (IRR) calculation
//!
//! Bisection over the discount rate, starting from the interval
//! (-100%, +100%) and doubling an endpoint whenever the interval
//! collapses because the root lies outside it.

use super::config::{SolverConfig, TimingOffset, HIGH_RATE, LOW_RATE};
use super::dcf::{evaluate, evaluate_npv, Evaluation};
use super::result::{IrrResult, IrrStatus};
use crate::cashflow::CashflowSeries;

/// Calculate the IRR of a cashflow series
///
/// Returns [`IrrResult::undefined`] (rate 0.0) without solving when the
/// series lacks either a positive or a negative cashflow.
pub fn calculate_irr(series: &CashflowSeries, timing_offset: TimingOffset) -> IrrResult {
    if !series.has_sign_change() {
        log::debug!(
            "No sign change in {} cashflows, IRR undefined",
            series.len()
        );
        return IrrResult::undefined();
    }

    let config = SolverConfig::for_series(series, timing_offset);
    let result = solve_irr(series.values(), &config);

    match result.status {
        IrrStatus::Converged => log::debug!(
            "IRR {:.6} converged after {} iterations (npv {:.3e}, tolerance {:.3e})",
            result.rate,
            result.iterations,
            result.npv,
            config.tolerance
        ),
        status => log::warn!(
            "IRR did not converge ({}), returning last guess {:.6} after {} iterations",
            status,
            result.rate,
            result.iterations
        ),
    }

    result
}

/// Solve for the rate at which the NPV of `cashflows` is within
/// `config.tolerance` of zero.
///
/// The caller must ensure the cashflows contain both signs. The solver
/// never fails: when the iteration cap is hit the last midpoint is
/// returned with a non-converged status.
pub fn solve_irr(cashflows: &[f64], config: &SolverConfig) -> IrrResult {
    let offset = config.timing_offset;
    let mut low = LOW_RATE;
    let mut high = HIGH_RATE;

    // Whether NPV rises or falls with the rate depends on whether outflows
    // precede inflows (-10 1 2 3) or follow them (1 2 3 -10). Probing both
    // ends of the interval settles it: "switched" means NPV falls as the
    // rate falls.
    let switched = evaluate_npv(cashflows, low, offset) < evaluate_npv(cashflows, high, offset);

    let mut guess = 0.0;
    let mut last: Option<Evaluation> = None;

    for iteration in 1..=config.max_iterations {
        guess = (low + high) / 2.0;
        let evaluation = evaluate(cashflows, guess, offset);
        let npv = evaluation.npv;

        if npv.abs() < config.tolerance {
            return IrrResult {
                rate: guess,
                status: IrrStatus::Converged,
                iterations: iteration,
                npv,
            };
        }

        let rate_too_low = (npv > 0.0 && !switched) || (npv < 0.0 && switched);
        if rate_too_low {
            low = guess;
            if low == high {
                high *= 2.0;
            }
        } else {
            high = guess;
            if low == high {
                low *= 2.0;
            }
        }

        last = Some(evaluation);
    }

    let evaluation = last.unwrap_or_else(|| evaluate(cashflows, guess, offset));
    let status = if evaluation.unstable {
        IrrStatus::NumericallyUnstable
    } else {
        IrrStatus::IterationCapReached
    };

    IrrResult {
        rate: guess,
        status,
        iterations: config.max_iterations,
        npv: evaluation.npv,
    }
}
