//! Discounted cashflow (NPV) evaluation
//!
//! Period 0 is never discounted. Period `i >= 1` is discounted by
//! `(1 + rate)^(i - 1 + offset)` where the offset comes from [`TimingOffset`].

use super::config::TimingOffset;

/// Magnitude of the NPV reported when a discount factor is not a number
pub const UNSTABLE_NPV: f64 = 999_999_999.0;

/// Discount factor substituted at a rate of exactly -100%
pub const SINGULAR_DISCOUNT_FACTOR: f64 = 1e-8;

/// Outcome of one NPV evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Evaluation {
    pub npv: f64,
    /// The evaluation was cut short by a NaN discount factor and `npv`
    /// holds the +/-UNSTABLE_NPV sentinel.
    pub unstable: bool,
}

/// Discount factor applied to the cashflow of `period`
pub fn discount_factor(period: usize, rate: f64, timing_offset: TimingOffset) -> f64 {
    if period == 0 {
        return 1.0;
    }
    if rate == -1.0 {
        return SINGULAR_DISCOUNT_FACTOR;
    }
    (1.0 + rate).powf(period as f64 - 1.0 + timing_offset.as_f64())
}

pub(crate) fn evaluate(cashflows: &[f64], rate: f64, timing_offset: TimingOffset) -> Evaluation {
    let mut npv = 0.0;

    for (period, &cf) in cashflows.iter().enumerate() {
        let factor = discount_factor(period, rate, timing_offset);

        if factor.is_nan() {
            // Push the search away from the unstable region with a strongly
            // signed value: positive below zero, negative otherwise.
            let sentinel = if rate < 0.0 { UNSTABLE_NPV } else { -UNSTABLE_NPV };
            return Evaluation {
                npv: sentinel,
                unstable: true,
            };
        }

        npv += cf / factor;
    }

    Evaluation {
        npv,
        unstable: false,
    }
}

/// Net present value of `cashflows` at the periodic discount `rate`
///
/// Never fails: a rate of exactly -1 uses a near-zero discount factor and a
/// NaN discount factor yields +999,999,999 for negative rates and
/// -999,999,999 otherwise.
pub fn evaluate_npv(cashflows: &[f64], rate: f64, timing_offset: TimingOffset) -> f64 {
    evaluate(cashflows, rate, timing_offset).npv
}
