//! Logarithmic Market Scoring Rule (LMSR) pricing kernel.
//!
//! Implements the cost function, implied-probability vector, and trade
//! cost delta for N-outcome prediction markets.
//! Reference: Hanson (2003) "Combinatorial Information Market Design"
//!
//! Key formulas:
//! - Cost function: C(q) = b * ln(sum(e^(q_i/b)))
//! - Price (probability): p_i = e^(q_i/b) / sum(e^(q_j/b))
//! - Trade cost: C(q_new) - C(q_old)
//!
//! All public inputs and outputs are `Decimal` (fixed-point, monetary
//! semantics). Transcendental evaluation happens in `f64` inside the
//! kernel and is converted back before any value crosses the boundary.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{LmsrError, LmsrResult};

/// Lowest admissible implied probability (0.1%).
pub const MIN_PRICE: Decimal = dec!(0.001);

/// Highest admissible implied probability (99.9%).
pub const MAX_PRICE: Decimal = dec!(0.999);

/// Rounding precision for monetary values (4 decimal places).
pub const PRECISION: Decimal = dec!(0.0001);

/// Number of decimal places kept at the API boundary.
pub const DECIMAL_PLACES: u32 = 4;

/// Exponent arguments beyond this saturate rather than overflow.
/// `f64::exp` overflows around 709 in natural-log space.
const MAX_EXP_ARG: f64 = 700.0;

/// Price boundaries for a market.
///
/// Prevents implied probabilities from reaching degenerate extremes
/// that would make trading impractical. Immutable for the life of a
/// market; defaults to the process-wide [`MIN_PRICE`]/[`MAX_PRICE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Lower price bound, exclusive floor for admission.
    pub min: Decimal,
    /// Upper price bound, exclusive ceiling for admission.
    pub max: Decimal,
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            min: MIN_PRICE,
            max: MAX_PRICE,
        }
    }
}

impl PriceBounds {
    /// Creates custom bounds.
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Clamps a price into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, price: Decimal) -> Decimal {
        price.clamp(self.min, self.max)
    }
}

/// LMSR pricing model for an N-outcome market.
///
/// The liquidity parameter `b` controls market depth:
/// - Higher `b` = more liquidity, slower price movement, higher capital requirement
/// - Lower `b` = less liquidity, faster price movement
///
/// The model is a cheap `Copy` value holding only static market
/// configuration; the authoritative outcome-quantity vector is owned by
/// the caller and borrowed per call. No state is retained across calls,
/// so a model may be shared freely between threads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LmsrModel {
    /// Liquidity parameter (b > 0), immutable for the market's lifetime.
    b: Decimal,
    /// Price boundaries applied by `prices` and the admission checker.
    bounds: PriceBounds,
}

impl LmsrModel {
    /// Creates a model with the given liquidity parameter and the
    /// default price bounds.
    ///
    /// # Errors
    /// Returns [`LmsrError::InvalidMarketConfig`] if `b` is not positive.
    pub fn new(b: Decimal) -> LmsrResult<Self> {
        Self::with_bounds(b, PriceBounds::default())
    }

    /// Creates a model with custom price bounds.
    ///
    /// # Errors
    /// Returns [`LmsrError::InvalidMarketConfig`] if `b` is not positive.
    pub fn with_bounds(b: Decimal, bounds: PriceBounds) -> LmsrResult<Self> {
        if b <= Decimal::ZERO {
            return Err(LmsrError::InvalidMarketConfig(
                "liquidity parameter b must be positive".to_string(),
            ));
        }
        Ok(Self { b, bounds })
    }

    /// Returns the liquidity parameter.
    #[must_use]
    pub const fn liquidity(&self) -> Decimal {
        self.b
    }

    /// Returns the price bounds.
    #[must_use]
    pub const fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    /// Validates an outcome-quantity vector against this market.
    pub(crate) fn validate_outcomes(&self, quantities: &[Decimal]) -> LmsrResult<()> {
        if quantities.len() < 2 {
            return Err(LmsrError::InvalidMarketConfig(
                "market must have at least 2 outcomes".to_string(),
            ));
        }
        Ok(())
    }

    /// Computes `e^((q_i - max_q)/b)` for every outcome.
    ///
    /// Factoring out the maximum quantity is the log-sum-exp trick: all
    /// exponent arguments become <= 0, so the sum cannot overflow and
    /// always includes a term equal to 1. Both `cost` and `prices` are
    /// derived from this one set of exponentials so their results agree.
    fn scaled_exponentials(&self, quantities: &[Decimal]) -> LmsrResult<(Decimal, Vec<f64>)> {
        self.validate_outcomes(quantities)?;

        let max_q = quantities.iter().copied().max().unwrap_or_default();
        let b = self.b.to_f64().unwrap_or(1.0);

        let exps = quantities
            .iter()
            .map(|q| {
                let exponent = (*q - max_q).to_f64().unwrap_or(0.0) / b;
                exponent.clamp(-MAX_EXP_ARG, MAX_EXP_ARG).exp()
            })
            .collect();

        Ok((max_q, exps))
    }

    /// Computes the LMSR cost function: C(q) = b * ln(sum(e^(q_i/b))).
    ///
    /// Evaluated in the numerically stable form
    /// `max_q + b * ln(sum(e^((q_i - max_q)/b)))` and rounded half-up
    /// to 4 decimal places. The rounding is load-bearing: trade cost is
    /// the difference of two already-rounded cost values.
    ///
    /// # Errors
    /// Returns [`LmsrError::InvalidMarketConfig`] for fewer than 2 outcomes.
    pub fn cost(&self, quantities: &[Decimal]) -> LmsrResult<Decimal> {
        let (max_q, exps) = self.scaled_exponentials(quantities)?;
        let scaled_sum: f64 = exps.iter().sum();

        // C(q) = max_q + b * ln(scaled_sum); scaled_sum >= 1 because the
        // max-quantity term contributes e^0, so ln never sees zero.
        let log_sum = Decimal::from_f64(scaled_sum.ln()).unwrap_or(Decimal::ZERO);
        let cost = max_q + self.b * log_sum;

        Ok(round_money(cost))
    }

    /// Computes the price (implied probability) of every outcome:
    /// p_i = e^(q_i/b) / sum(e^(q_j/b)).
    ///
    /// With `apply_bounds` false the raw normalized vector is returned;
    /// this is what the admission checker inspects to detect boundary
    /// violations precisely. With `apply_bounds` true each price is
    /// clamped into the configured bounds and the clamped vector is then
    /// renormalized so it sums to exactly 1 (clamp first, renormalize
    /// second — the reverse order does not guarantee the bound).
    ///
    /// # Errors
    /// Returns [`LmsrError::InvalidMarketConfig`] for fewer than 2 outcomes.
    pub fn prices(&self, quantities: &[Decimal], apply_bounds: bool) -> LmsrResult<Vec<Decimal>> {
        let (_, exps) = self.scaled_exponentials(quantities)?;
        let total: f64 = exps.iter().sum();

        let raw: Vec<Decimal> = exps
            .iter()
            .map(|exp| Decimal::from_f64(exp / total).unwrap_or(Decimal::ZERO))
            .collect();

        if !apply_bounds {
            return Ok(raw.into_iter().map(round_money).collect());
        }

        let bounded: Vec<Decimal> = raw.into_iter().map(|p| self.bounds.clamp(p)).collect();
        let bounded_total: Decimal = bounded.iter().sum();

        Ok(bounded
            .into_iter()
            .map(|p| round_money(p / bounded_total))
            .collect())
    }

    /// Computes the cost of trading `delta` shares of `outcome`:
    /// C(q_new) - C(q_old).
    ///
    /// Positive result = buyer pays; negative = buyer receives (sell).
    /// A zero delta short-circuits to exactly zero rather than
    /// subtracting two equal costs, which could leave rounding noise.
    ///
    /// # Errors
    /// Returns [`LmsrError::InvalidMarketConfig`] for fewer than 2
    /// outcomes, or [`LmsrError::IndexOutOfRange`] for a bad index.
    pub fn trade_cost(
        &self,
        quantities: &[Decimal],
        outcome: usize,
        delta: Decimal,
    ) -> LmsrResult<Decimal> {
        self.validate_outcomes(quantities)?;

        if outcome >= quantities.len() {
            return Err(LmsrError::IndexOutOfRange {
                index: outcome,
                len: quantities.len(),
            });
        }

        if delta.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let cost_before = self.cost(quantities)?;

        let mut bumped = quantities.to_vec();
        bumped[outcome] += delta;
        let cost_after = self.cost(&bumped)?;

        Ok(round_money(cost_after - cost_before))
    }
}

/// Rounds a monetary value half-up to [`DECIMAL_PLACES`].
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
