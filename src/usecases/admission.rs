//! Trade admission control against price boundaries.
//!
//! The single gate that keeps a trade from driving any outcome's
//! implied probability outside the configured bounds. The kernel's
//! bounded `prices` call clamps for display; admission inspects the
//! *unbounded* post-trade vector, so a violation is detected instead of
//! silently masked by the clamp-and-renormalize step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::lmsr::LmsrModel;

/// Why a trade was rejected.
///
/// Rejection is a normal, frequent business outcome, so the taxonomy is
/// a value type rather than an error. Serialized form is consumed by
/// the API layer to build "trade not allowed" responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The trade would push this outcome's price below the minimum bound.
    PriceBelowMinimum {
        /// Outcome whose price would violate the bound.
        outcome: usize,
        /// The unbounded post-trade price.
        price: Decimal,
        /// The configured minimum.
        min_price: Decimal,
    },
    /// The trade would push this outcome's price above the maximum bound.
    PriceAboveMaximum {
        /// Outcome whose price would violate the bound.
        outcome: usize,
        /// The unbounded post-trade price.
        price: Decimal,
        /// The configured maximum.
        max_price: Decimal,
    },
    /// The quantity vector has fewer than 2 outcomes.
    NotEnoughOutcomes {
        /// Observed vector length.
        len: usize,
    },
    /// The outcome index is outside the quantity vector.
    OutcomeOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of outcomes in the market.
        len: usize,
    },
    /// The post-trade price vector could not be computed.
    PriceComputation(String),
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PriceBelowMinimum {
                outcome,
                price,
                min_price,
            } => write!(
                f,
                "trade would push outcome {outcome} price to {price}, below minimum {min_price}"
            ),
            Self::PriceAboveMaximum {
                outcome,
                price,
                max_price,
            } => write!(
                f,
                "trade would push outcome {outcome} price to {price}, above maximum {max_price}"
            ),
            Self::NotEnoughOutcomes { len } => {
                write!(f, "market must have at least 2 outcomes, got {len}")
            }
            Self::OutcomeOutOfRange { index, len } => {
                write!(f, "outcome index {index} out of range for {len} outcomes")
            }
            Self::PriceComputation(msg) => write!(f, "price calculation error: {msg}"),
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeDecision {
    /// Whether the trade may execute.
    pub allowed: bool,
    /// Populated iff the trade was rejected.
    pub reason: Option<RejectionReason>,
}

impl TradeDecision {
    /// An allowed trade.
    #[must_use]
    pub const fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A rejected trade with the given reason.
    #[must_use]
    pub const fn reject(reason: RejectionReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Whether the trade may execute.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        self.allowed
    }
}

/// Admission checker for a single market.
///
/// Holds the market's pricing model; the liquidity parameter was
/// validated when the model was constructed, so every market-state
/// input here resolves to a decision rather than an error.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionChecker {
    model: LmsrModel,
}

impl AdmissionChecker {
    /// Creates a checker for the given market model.
    #[must_use]
    pub const fn new(model: LmsrModel) -> Self {
        Self { model }
    }

    /// Returns the underlying pricing model.
    #[must_use]
    pub const fn model(&self) -> &LmsrModel {
        &self.model
    }

    /// Decides whether trading `delta` shares of `outcome` may execute.
    ///
    /// Computes the unbounded price vector for the hypothetical
    /// post-trade quantities and rejects if any price leaves the
    /// configured bounds, citing the offending outcome. Always returns
    /// a decision; malformed vectors and bad indices become rejection
    /// reasons instead of errors.
    #[must_use]
    pub fn is_trade_allowed(
        &self,
        quantities: &[Decimal],
        outcome: usize,
        delta: Decimal,
    ) -> TradeDecision {
        if quantities.len() < 2 {
            return Self::rejected(RejectionReason::NotEnoughOutcomes {
                len: quantities.len(),
            });
        }

        if outcome >= quantities.len() {
            return Self::rejected(RejectionReason::OutcomeOutOfRange {
                index: outcome,
                len: quantities.len(),
            });
        }

        let mut post_trade = quantities.to_vec();
        post_trade[outcome] += delta;

        let prices = match self.model.prices(&post_trade, false) {
            Ok(prices) => prices,
            Err(err) => {
                return Self::rejected(RejectionReason::PriceComputation(err.to_string()));
            }
        };

        let bounds = self.model.bounds();
        for (i, price) in prices.iter().enumerate() {
            if *price < bounds.min {
                return Self::rejected(RejectionReason::PriceBelowMinimum {
                    outcome: i,
                    price: *price,
                    min_price: bounds.min,
                });
            }
            if *price > bounds.max {
                return Self::rejected(RejectionReason::PriceAboveMaximum {
                    outcome: i,
                    price: *price,
                    max_price: bounds.max,
                });
            }
        }

        TradeDecision::allow()
    }

    fn rejected(reason: RejectionReason) -> TradeDecision {
        debug!(%reason, "trade rejected");
        TradeDecision::reject(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn checker(b: Decimal) -> AdmissionChecker {
        AdmissionChecker::new(LmsrModel::new(b).expect("valid liquidity"))
    }

    #[test]
    fn balanced_trade_is_allowed() {
        let c = checker(dec!(100));
        let decision = c.is_trade_allowed(&[dec!(0), dec!(0)], 0, dec!(10));
        assert!(decision.is_allowed());
        assert_eq!(decision.reason, None);
    }

    #[test]
    fn trade_breaching_max_price_is_rejected() {
        let c = checker(dec!(100));
        let decision = c.is_trade_allowed(&[dec!(500), dec!(0)], 0, dec!(1000));
        assert!(!decision.is_allowed());
        assert!(matches!(
            decision.reason,
            Some(RejectionReason::PriceAboveMaximum { outcome: 0, .. })
        ));
    }

    #[test]
    fn trade_breaching_min_price_cites_the_starved_outcome() {
        let c = checker(dec!(100));
        // Selling outcome 0 hard starves it, not outcome 1
        let decision = c.is_trade_allowed(&[dec!(0), dec!(0)], 0, dec!(-1500));
        assert!(!decision.is_allowed());
        assert!(matches!(
            decision.reason,
            Some(RejectionReason::PriceBelowMinimum { outcome: 0, .. })
        ));
    }

    #[test]
    fn short_vector_is_a_rejection_not_an_error() {
        let c = checker(dec!(100));
        let decision = c.is_trade_allowed(&[dec!(0)], 0, dec!(1));
        assert!(matches!(
            decision.reason,
            Some(RejectionReason::NotEnoughOutcomes { len: 1 })
        ));
    }

    #[test]
    fn out_of_range_index_is_a_rejection_not_an_error() {
        let c = checker(dec!(100));
        let decision = c.is_trade_allowed(&[dec!(0), dec!(0)], 5, dec!(1));
        assert!(matches!(
            decision.reason,
            Some(RejectionReason::OutcomeOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn moderate_trade_within_bounds_is_allowed() {
        let c = checker(dec!(100));
        let decision = c.is_trade_allowed(&[dec!(500), dec!(0)], 0, dec!(10));
        assert!(decision.is_allowed());
    }

    #[test]
    fn rejection_reason_displays_offending_outcome() {
        let c = checker(dec!(100));
        let decision = c.is_trade_allowed(&[dec!(500), dec!(0)], 0, dec!(1000));
        let reason = decision.reason.expect("rejected");
        assert!(reason.to_string().contains("outcome 0"));
    }

    #[test]
    fn decision_round_trips_through_serde() {
        let decision = TradeDecision::reject(RejectionReason::PriceAboveMaximum {
            outcome: 1,
            price: dec!(0.9995),
            max_price: dec!(0.999),
        });
        let json = serde_json::to_string(&decision).unwrap();
        let back: TradeDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decision);
    }
}
