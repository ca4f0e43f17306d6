//! LMSR Pricing Engine — Library Root
//!
//! Stateless Logarithmic Market Scoring Rule core for N-outcome
//! prediction markets. Re-exports all modules for integration tests
//! and benchmarks.

pub mod domain;
pub mod error;
pub mod usecases;

pub use domain::lmsr::{LmsrModel, PriceBounds, MAX_PRICE, MIN_PRICE, PRECISION};
pub use error::{LmsrError, LmsrResult};
pub use usecases::admission::{AdmissionChecker, RejectionReason, TradeDecision};
pub use usecases::solver::ShareEstimator;
