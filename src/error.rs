//! Error types for the pricing engine.

use thiserror::Error;

/// Result type alias for pricing engine operations.
pub type LmsrResult<T> = std::result::Result<T, LmsrError>;

/// Errors surfaced by the pricing kernel.
///
/// Both variants indicate a caller or configuration bug, never a market
/// condition: rejected trades are modeled as [`TradeDecision`] values,
/// not errors, and numeric overflow is absorbed by exponent clamping.
///
/// [`TradeDecision`]: crate::usecases::admission::TradeDecision
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LmsrError {
    /// Market is misconfigured: fewer than 2 outcomes, or b <= 0.
    #[error("invalid market config: {0}")]
    InvalidMarketConfig(String),

    /// Outcome index outside the quantity vector's bounds.
    #[error("outcome index {index} out of range for {len} outcomes")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of outcomes in the market.
        len: usize,
    },
}
