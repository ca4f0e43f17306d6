//! Inverse pricing: shares purchasable for a target spend.
//!
//! The kernel maps quantity to cost; callers usually hold a budget and
//! want the reverse. Cost is monotone in the quantity delta, so a plain
//! bisection over the delta converges without derivative information.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::domain::lmsr::{round_money, LmsrModel, PRECISION};
use crate::error::LmsrResult;

/// Default bisection iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Estimates the quantity of an outcome purchasable for a given spend.
#[derive(Debug, Clone, Copy)]
pub struct ShareEstimator {
    model: LmsrModel,
    max_iterations: u32,
}

impl ShareEstimator {
    /// Creates an estimator with the default iteration cap.
    #[must_use]
    pub const fn new(model: LmsrModel) -> Self {
        Self {
            model,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Overrides the bisection iteration cap.
    #[must_use]
    pub const fn with_max_iterations(model: LmsrModel, max_iterations: u32) -> Self {
        Self {
            model,
            max_iterations,
        }
    }

    /// Returns the underlying pricing model.
    #[must_use]
    pub const fn model(&self) -> &LmsrModel {
        &self.model
    }

    /// Estimates how many shares of `outcome` can be bought without
    /// exceeding `target_cost`.
    ///
    /// Bisects the quantity delta over `[0, 10 * target_cost]`; spending
    /// X at a price of at least 0.1 buys at most 10X shares, which makes
    /// the upper bound safe for any in-bounds market. Exits early once
    /// the cost at the midpoint lands within [`PRECISION`] of the
    /// target; otherwise the best lower bound found is returned, a
    /// conservative underestimate that never overshoots the target.
    ///
    /// A non-positive `target_cost` buys nothing and returns zero.
    ///
    /// # Errors
    /// Returns [`LmsrError::InvalidMarketConfig`] for fewer than 2
    /// outcomes, or [`LmsrError::IndexOutOfRange`] for a bad index.
    ///
    /// [`LmsrError::InvalidMarketConfig`]: crate::error::LmsrError::InvalidMarketConfig
    /// [`LmsrError::IndexOutOfRange`]: crate::error::LmsrError::IndexOutOfRange
    pub fn shares_for_cost(
        &self,
        quantities: &[Decimal],
        outcome: usize,
        target_cost: Decimal,
    ) -> LmsrResult<Decimal> {
        self.model.validate_outcomes(quantities)?;

        if target_cost <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let mut low = Decimal::ZERO;
        let mut high = target_cost * dec!(10);

        for iteration in 0..self.max_iterations {
            let mid = (low + high) / dec!(2);
            let cost = self.model.trade_cost(quantities, outcome, mid)?;

            if (cost - target_cost).abs() < PRECISION {
                debug!(iteration, %mid, %cost, "bisection converged");
                return Ok(round_money(mid));
            }

            if cost < target_cost {
                low = mid;
            } else {
                high = mid;
            }
        }

        debug!(max_iterations = self.max_iterations, %low, "bisection exhausted, returning lower bound");
        Ok(round_money(low))
    }
}
